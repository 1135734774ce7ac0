//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff headers per changed file
//! - One hunk per changed line

use crate::orchestrator::{FileChange, RenameOutcome};
use crate::output::OutputFormatter;
use std::io::Write;

/// Diff formatter for showing changed lines
#[derive(Default)]
pub struct DiffFormatter;

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new() -> Self {
        Self
    }

    fn dry_run_prefix(dry_run: bool) -> &'static str {
        if dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, outcome: &RenameOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        for file in &outcome.files {
            self.format_file(file, outcome.dry_run, writer)?;
        }

        let prefix = Self::dry_run_prefix(outcome.dry_run);
        let verb = if outcome.dry_run { "would be" } else { "were" };
        writeln!(
            writer,
            "{}# {} -> {}: {} reference(s) {} rewritten in {} file(s)",
            prefix,
            outcome.old_path,
            outcome.new_path,
            outcome.applied,
            verb,
            outcome.files.len()
        )
    }

    fn format_file(
        &self,
        file: &FileChange,
        dry_run: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if file.changes.is_empty() {
            return Ok(());
        }

        let prefix = Self::dry_run_prefix(dry_run);
        let path = file.path.display().to_string().replace('\\', "/");
        writeln!(writer, "{}--- a/{}", prefix, path)?;
        writeln!(writer, "{}+++ b/{}", prefix, path)?;

        for change in &file.changes {
            writeln!(writer, "@@ -{},1 +{},1 @@", change.line, change.line)?;
            writeln!(writer, "-{}", change.before)?;
            writeln!(writer, "+{}", change.after)?;
        }

        writeln!(writer)
    }
}
