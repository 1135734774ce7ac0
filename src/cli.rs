//! CLI argument parsing module for modrename

use crate::error::ConfigError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Gradle module path rename tool
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modrename",
    version,
    about = "Rename a Gradle module and every project() reference to it"
)]
pub struct CliArgs {
    /// Module path to rename (e.g. :app:feature)
    pub old_path: String,

    /// New name for the last path segment (e.g. featureX)
    pub new_name: String,

    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    // General options
    /// Dry run mode - show what would be renamed without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Scan options
    /// Skip directories with this name while scanning (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Leave settings.gradle alone and don't require it
    #[arg(long)]
    pub no_settings: bool,

    /// Config file to use instead of <root>/modrename.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Reject option combinations that make no sense together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::conflicting_options(
                "--quiet and --verbose cannot be used together",
            ));
        }
        if self.json && self.diff {
            return Err(ConfigError::conflicting_options(
                "--json and --diff cannot be used together",
            ));
        }
        Ok(())
    }

    /// Whether progress spinners should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
