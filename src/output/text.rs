//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A one-line summary of the rename with colors
//! - Per-file changed lines (before/after)
//! - Warnings and unparsable declarations

use crate::orchestrator::{FileChange, RenameOutcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn dry_run_prefix(&self, dry_run: bool) -> String {
        match (dry_run, self.color) {
            (false, _) => String::new(),
            (true, true) => format!("{} ", "(dry-run)".cyan()),
            (true, false) => "(dry-run) ".to_string(),
        }
    }

    fn format_header(&self, outcome: &RenameOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(outcome.dry_run);
        let verb = if outcome.dry_run {
            "Would rename"
        } else {
            "Renamed"
        };
        let files = outcome.files.len();
        let files_label = if files == 1 { "file" } else { "files" };
        let refs_label = if outcome.applied == 1 {
            "reference"
        } else {
            "references"
        };

        if self.color {
            writeln!(
                writer,
                "{}{} {} {} {} ({} {}, {} {})",
                prefix,
                verb,
                outcome.old_path.bold(),
                "→".dimmed(),
                outcome.new_path.bright_white().bold(),
                outcome.applied.to_string().green(),
                refs_label,
                files.to_string().green(),
                files_label
            )
        } else {
            writeln!(
                writer,
                "{}{} {} -> {} ({} {}, {} {})",
                prefix,
                verb,
                outcome.old_path,
                outcome.new_path,
                outcome.applied,
                refs_label,
                files,
                files_label
            )
        }
    }

    fn format_problems(&self, outcome: &RenameOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        for warning in &outcome.warnings {
            if self.color {
                writeln!(writer, "{} {}", "warning:".yellow().bold(), warning)?;
            } else {
                writeln!(writer, "warning: {}", warning)?;
            }
        }
        for error in &outcome.errors {
            if self.color {
                writeln!(writer, "{} {}", "error:".red().bold(), error)?;
            } else {
                writeln!(writer, "error: {}", error)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &RenameOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            // Only what needs attention
            return self.format_problems(outcome, writer);
        }

        if outcome.files.is_empty() {
            let prefix = self.dry_run_prefix(outcome.dry_run);
            writeln!(
                writer,
                "{}No references to {} found",
                prefix, outcome.old_path
            )?;
        } else {
            for file in &outcome.files {
                self.format_file(file, outcome.dry_run, writer)?;
            }
            self.format_header(outcome, writer)?;
        }

        self.format_problems(outcome, writer)
    }

    fn format_file(
        &self,
        file: &FileChange,
        dry_run: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(dry_run);
        let path_display = file.path.display().to_string();
        let count = file.changes.len();
        let label = if count == 1 { "change" } else { "changes" };

        if self.color {
            writeln!(
                writer,
                "{}{} {}",
                prefix,
                path_display.bold(),
                format!("({} {})", count, label).dimmed()
            )?;
        } else {
            writeln!(writer, "{}{} ({} {})", prefix, path_display, count, label)?;
        }

        for change in &file.changes {
            if self.verbosity == Verbosity::Verbose {
                if self.color {
                    writeln!(writer, "  {:>4}: {}", change.line, change.before.trim().dimmed())?;
                    writeln!(writer, "  {:>4}  {}", "", change.after.trim().green())?;
                } else {
                    writeln!(writer, "  {:>4}: {}", change.line, change.before.trim())?;
                    writeln!(writer, "  {:>4}  {}", "", change.after.trim())?;
                }
            } else if self.color {
                writeln!(
                    writer,
                    "  {:>4}: {}",
                    change.line.to_string().dimmed(),
                    change.after.trim()
                )?;
            } else {
                writeln!(writer, "  {:>4}: {}", change.line, change.after.trim())?;
            }
        }

        Ok(())
    }
}
