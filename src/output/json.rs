//! JSON output formatter for machine processing
//!
//! Schema:
//!
//! ```json
//! {
//!   "dry_run": false,
//!   "old_path": ":lib",
//!   "new_path": ":core",
//!   "applied": 1,
//!   "files": [{ "path": "app/build.gradle", "changes": [{ "line": 2, "before": "...", "after": "..." }] }],
//!   "warnings": [],
//!   "errors": []
//! }
//! ```

use crate::manifest::LineChange;
use crate::orchestrator::{FileChange, RenameOutcome};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbose output includes whether each file was written
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    dry_run: bool,
    old_path: &'a str,
    new_path: &'a str,
    /// Number of declarations rewritten
    applied: usize,
    files: Vec<JsonFile<'a>>,
    warnings: &'a [String],
    errors: Vec<String>,
}

/// JSON representation of one changed file
#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    changes: &'a [LineChange],
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<bool>,
}

impl JsonFormatter {
    fn file_to_json<'a>(&self, file: &'a FileChange) -> JsonFile<'a> {
        JsonFile {
            path: file.path.display().to_string().replace('\\', "/"),
            changes: &file.changes,
            written: (self.verbosity == Verbosity::Verbose).then_some(file.written),
        }
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &RenameOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dry_run: outcome.dry_run,
            old_path: &outcome.old_path,
            new_path: &outcome.new_path,
            applied: outcome.applied,
            files: outcome.files.iter().map(|f| self.file_to_json(f)).collect(),
            warnings: &outcome.warnings,
            errors: outcome.errors.iter().map(|e| e.to_string()).collect(),
        };
        Self::write_json(&output, writer)
    }

    fn format_file(
        &self,
        file: &FileChange,
        _dry_run: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(&self.file_to_json(file), writer)
    }
}
