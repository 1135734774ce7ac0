//! Build file editing
//!
//! This module provides:
//! - EditPlan for collecting span replacements per file
//! - Staleness checks against the current file content before anything is written
//! - ManifestWriter with dry-run support and rollback on write failure

use crate::domain::SourceSpan;
use crate::error::ManifestError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Replacement of the text at one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: SourceSpan,
    /// Text the span must still hold
    pub expected: String,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(span: SourceSpan, expected: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            expected: expected.into(),
            replacement: replacement.into(),
        }
    }
}

/// One changed line of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// Line number (1-based)
    pub line: usize,
    pub before: String,
    pub after: String,
}

/// A file with all of its edits applied in memory
#[derive(Debug, Clone)]
pub struct PreparedFile {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    pub changes: Vec<LineChange>,
}

impl PreparedFile {
    pub fn is_modified(&self) -> bool {
        self.original != self.updated
    }
}

/// Edits grouped by file
#[derive(Debug, Clone, Default)]
pub struct EditPlan {
    edits: BTreeMap<PathBuf, Vec<TextEdit>>,
}

impl EditPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edit for the file its span points at
    pub fn add(&mut self, edit: TextEdit) {
        self.edits
            .entry(edit.span.file.clone())
            .or_default()
            .push(edit);
    }

    /// Number of edits across all files
    pub fn len(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Read every file and apply its edits in memory
    ///
    /// Fails without touching anything if a span no longer holds its expected
    /// text or two edits overlap.
    pub fn prepare(&self) -> Result<Vec<PreparedFile>, ManifestError> {
        self.edits
            .iter()
            .map(|(path, edits)| {
                let original = read_manifest(path)?;
                prepare_file(path, original, edits)
            })
            .collect()
    }
}

/// Apply `edits` to `original`
pub fn prepare_file(
    path: &Path,
    original: String,
    edits: &[TextEdit],
) -> Result<PreparedFile, ManifestError> {
    let mut edits: Vec<&TextEdit> = edits.iter().collect();
    edits.sort_by_key(|e| e.span.start);

    for pair in edits.windows(2) {
        if pair[0].span.end > pair[1].span.start {
            return Err(ManifestError::OverlappingEdits {
                path: path.to_path_buf(),
                line: pair[1].span.line,
            });
        }
    }

    for edit in &edits {
        let found = original.get(edit.span.range()).unwrap_or_default();
        if found != edit.expected {
            return Err(ManifestError::stale_file(
                path,
                edit.span.line,
                edit.expected.as_str(),
                found,
            ));
        }
    }

    // Back to front, so earlier offsets stay valid
    let mut updated = original.clone();
    for edit in edits.iter().rev() {
        updated.replace_range(edit.span.range(), &edit.replacement);
    }

    let mut lines: Vec<usize> = edits.iter().map(|e| e.span.line).collect();
    lines.dedup();
    let changes = lines
        .into_iter()
        .filter_map(|line| {
            let before = original.lines().nth(line - 1)?;
            let after = updated.lines().nth(line - 1)?;
            (before != after).then(|| LineChange {
                line,
                before: before.to_string(),
                after: after.to_string(),
            })
        })
        .collect();

    Ok(PreparedFile {
        path: path.to_path_buf(),
        original,
        updated,
        changes,
    })
}

/// Writer for prepared build files
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of writing prepared files
#[derive(Debug, Default)]
pub struct WriteResult {
    /// Files actually written
    pub written: Vec<PathBuf>,
    /// Files left alone (dry run or no change)
    pub skipped: Vec<PathBuf>,
}

impl WriteResult {
    pub fn was_written(&self, path: &Path) -> bool {
        self.written.iter().any(|p| p == path)
    }
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write every modified file
    ///
    /// If a write fails, files already written get their original content
    /// back before the error is returned.
    pub fn write_all(&self, files: &[PreparedFile]) -> Result<WriteResult, ManifestError> {
        let mut result = WriteResult::default();

        for file in files {
            if self.dry_run || !file.is_modified() {
                result.skipped.push(file.path.clone());
                continue;
            }

            if let Err(e) = write_manifest(&file.path, &file.updated) {
                rollback(files, &result.written);
                return Err(e);
            }
            debug!(path = %file.path.display(), changes = file.changes.len(), "wrote build file");
            result.written.push(file.path.clone());
        }

        Ok(result)
    }
}

fn rollback(files: &[PreparedFile], written: &[PathBuf]) {
    for file in files.iter().filter(|f| written.contains(&f.path)) {
        if let Err(e) = write_manifest(&file.path, &file.original) {
            warn!(path = %file.path.display(), "failed to restore build file: {}", e);
        }
    }
}

/// Read a build file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(path)
        } else {
            ManifestError::read_error(path, e)
        }
    })
}

/// Write content to a build file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
