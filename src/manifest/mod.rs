//! Gradle build file detection, scanning and editing
//!
//! This module provides functionality to:
//! - Detect build and settings files in a project tree
//! - Scan project dependencies into declarations
//! - Read settings include statements
//! - Apply span edits to files with staleness checks

mod detector;
pub mod gradle;
mod settings;
mod writer;

pub use detector::{
    detect_build_files, find_settings, module_path_for, BuildFileInfo, BuildFileKind, Dsl,
};
pub use gradle::{GradleScanner, ScanOutcome};
pub use settings::{parse_settings, read_settings, ModuleInclude, SettingsFile};
pub use writer::{
    prepare_file, read_manifest, write_manifest, EditPlan, LineChange, ManifestWriter,
    PreparedFile, TextEdit, WriteResult,
};

use crate::domain::DeclarationIds;
use crate::error::ManifestError;

/// Read and scan one build file
pub fn scan_build_file(
    info: &BuildFileInfo,
    ids: &mut DeclarationIds,
) -> Result<ScanOutcome, ManifestError> {
    let content = read_manifest(&info.path)?;
    Ok(GradleScanner::new().scan(&content, &info.module, &info.path, ids))
}
