//! Gradle build file detection
//!
//! Features:
//! - Detects build.gradle, build.gradle.kts, settings.gradle, settings.gradle.kts
//! - Maps each build file's directory to its module path
//! - Skips hidden and excluded directories, and nested builds with their own settings

use crate::config::ScanConfig;
use crate::domain::ModulePath;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Build script flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dsl {
    Groovy,
    Kotlin,
}

/// Kind of Gradle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildFileKind {
    /// build.gradle(.kts), holds dependency declarations
    Build,
    /// settings.gradle(.kts), holds include statements
    Settings,
}

impl BuildFileKind {
    /// Classify a file name
    pub fn from_file_name(name: &str) -> Option<(BuildFileKind, Dsl)> {
        match name {
            "build.gradle" => Some((BuildFileKind::Build, Dsl::Groovy)),
            "build.gradle.kts" => Some((BuildFileKind::Build, Dsl::Kotlin)),
            "settings.gradle" => Some((BuildFileKind::Settings, Dsl::Groovy)),
            "settings.gradle.kts" => Some((BuildFileKind::Settings, Dsl::Kotlin)),
            _ => None,
        }
    }
}

/// Information about a detected Gradle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFileInfo {
    /// Path to the file
    pub path: PathBuf,
    pub kind: BuildFileKind,
    pub dsl: Dsl,
    /// Module owning the file, derived from its directory
    pub module: ModulePath,
}

impl BuildFileInfo {
    /// Create a new BuildFileInfo
    pub fn new(path: impl Into<PathBuf>, kind: BuildFileKind, dsl: Dsl, module: ModulePath) -> Self {
        Self {
            path: path.into(),
            kind,
            dsl,
            module,
        }
    }

    pub fn is_settings(&self) -> bool {
        self.kind == BuildFileKind::Settings
    }
}

/// Module path for a directory below the project root
///
/// The root itself is `:`, and `app/feature` is `:app:feature`.
pub fn module_path_for(root: &Path, dir: &Path) -> ModulePath {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let names: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    ModulePath::absolute(names)
}

/// Detect all Gradle files below `root`
///
/// Settings files are only taken from the root. A subdirectory with its own
/// settings file is a separate build and is skipped entirely. Results are
/// sorted by path.
pub fn detect_build_files(root: &Path, config: &ScanConfig) -> Vec<BuildFileInfo> {
    let mut files = Vec::new();
    walk(root, root, 0, config, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(count = files.len(), root = %root.display(), "detected gradle files");
    files
}

fn walk(root: &Path, dir: &Path, depth: usize, config: &ScanConfig, files: &mut Vec<BuildFileInfo>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), "skipping unreadable directory: {}", e);
            return;
        }
    };

    let mut subdirs = Vec::new();
    let mut found = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !name.starts_with('.') && !config.is_excluded(&name) {
                subdirs.push(path);
            }
        } else if let Some((kind, dsl)) = BuildFileKind::from_file_name(&name) {
            found.push((path, kind, dsl));
        }
    }

    let is_root = depth == 0;
    if !is_root && found.iter().any(|(_, kind, _)| *kind == BuildFileKind::Settings) {
        debug!(dir = %dir.display(), "skipping nested build");
        return;
    }

    let module = module_path_for(root, dir);
    for (path, kind, dsl) in found {
        files.push(BuildFileInfo::new(path, kind, dsl, module.clone()));
    }

    if depth >= config.max_depth {
        return;
    }
    for subdir in subdirs {
        walk(root, &subdir, depth + 1, config, files);
    }
}

/// The root settings file, preferring settings.gradle over settings.gradle.kts
pub fn find_settings(files: &[BuildFileInfo]) -> Option<&BuildFileInfo> {
    files
        .iter()
        .filter(|f| f.is_settings())
        .min_by_key(|f| f.dsl == Dsl::Kotlin)
}
