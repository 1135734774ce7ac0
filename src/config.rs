//! Project configuration
//!
//! Reads `modrename.toml` from the project root when present:
//!
//! ```toml
//! [scan]
//! exclude = ["build", ".gradle"]
//! max_depth = 12
//!
//! [rename]
//! update_settings = true
//! require_settings = true
//! ```
//!
//! CLI flags take priority over file values.

use crate::cli::CliArgs;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Config file name looked up in the project root
pub const CONFIG_FILENAME: &str = "modrename.toml";

/// Directories never worth scanning for build files
const DEFAULT_EXCLUDES: [&str; 5] = ["build", "out", ".gradle", ".idea", "node_modules"];

/// Default directory depth limit for scanning
const DEFAULT_MAX_DEPTH: usize = 12;

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub rename: RenameConfig,
}

/// Build file discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory names skipped while scanning
    pub exclude: Vec<String>,
    /// Maximum directory depth below the root
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScanConfig {
    /// Check if a directory name is excluded
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude.iter().any(|e| e == dir_name)
    }
}

/// Settings file handling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Also rewrite the module's include entry in settings.gradle
    pub update_settings: bool,
    /// Fail when the project has no settings file
    pub require_settings: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            update_settings: true,
            require_settings: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load `modrename.toml` from a directory, falling back to defaults
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Resolve configuration for a CLI invocation
    ///
    /// Priority: --config file > modrename.toml in the root > defaults,
    /// then CLI flags on top.
    pub fn for_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let config = match args.config {
            Some(ref path) => Self::load(path)?,
            None => Self::from_dir(&args.root)?,
        };
        Ok(config.with_cli_overrides(args))
    }

    /// Apply CLI flags on top of file values
    pub fn with_cli_overrides(mut self, args: &CliArgs) -> Self {
        for dir in &args.exclude {
            if !self.scan.is_excluded(dir) {
                self.scan.exclude.push(dir.clone());
            }
        }
        if args.no_settings {
            self.rename.update_settings = false;
            self.rename.require_settings = false;
        }
        self
    }
}
