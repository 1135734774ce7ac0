//! Rename orchestrator for coordinating the entire rename workflow
//!
//! This module provides:
//! - Workflow coordination: detect → scan → check settings → propose → prepare → apply → write
//! - Settings checks (missing settings, unknown module, existing target)
//! - Dry-run mode support
//! - Error handling with partial continuation for unparsable declarations

use crate::cli::CliArgs;
use crate::config::Config;
use crate::domain::{ChangeSet, DeclarationIds, ModulePath, RenameRequest};
use crate::error::{AppError, ConfigError, ManifestError};
use crate::manifest::{
    detect_build_files, find_settings, read_settings, scan_build_file, BuildFileInfo, EditPlan,
    LineChange, ManifestWriter, SettingsFile, TextEdit,
};
use crate::parser::path::parse;
use crate::progress::Progress;
use crate::rename::{AppliedCount, DeclarationStore, SharedDeclarationStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Orchestrator for coordinating the rename workflow
pub struct Orchestrator {
    /// CLI arguments for the request and output options
    args: CliArgs,
    /// Resolved project configuration
    config: Config,
}

/// Everything read from the project before renaming
#[derive(Debug)]
pub struct ProjectScan {
    /// Declarations from every build file
    pub store: DeclarationStore,
    /// Root settings file, if one was read
    pub settings: Option<SettingsFile>,
    /// Detected Gradle files
    pub files: Vec<BuildFileInfo>,
    /// Declarations or files that could not be read
    pub errors: Vec<ManifestError>,
}

/// Changed lines of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// Path relative to the project root
    pub path: PathBuf,
    pub changes: Vec<LineChange>,
    /// Whether the file was written (false in dry-run mode)
    pub written: bool,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct RenameOutcome {
    /// Renamed module, canonical form
    pub old_path: String,
    /// New module path, canonical form
    pub new_path: String,
    pub dry_run: bool,
    /// Declarations updated in the store
    pub applied: AppliedCount,
    pub files: Vec<FileChange>,
    /// References that were found but not rewritten
    pub warnings: Vec<String>,
    /// Declarations that could not be parsed
    pub errors: Vec<ManifestError>,
}

impl RenameOutcome {
    /// Returns true if some declarations could not be parsed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of changed lines
    pub fn changed_lines(&self) -> usize {
        self.files.iter().map(|f| f.changes.len()).sum()
    }
}

impl Orchestrator {
    /// Create a new orchestrator, loading configuration for the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, ConfigError> {
        args.validate()?;
        let config = Config::for_cli(&args)?;
        Ok(Self { args, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the rename workflow
    pub fn run(&self) -> Result<RenameOutcome, AppError> {
        self.run_with_progress(self.args.show_progress())
    }

    /// Run the rename workflow with optional progress display
    pub fn run_with_progress(&self, show_progress: bool) -> Result<RenameOutcome, AppError> {
        let request = self.request()?;
        let root = &self.args.root;
        if !root.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: root.clone(),
                message: "not a directory".to_string(),
            }
            .into());
        }

        let mut progress = Progress::new(show_progress);

        // Step 1: Detect and scan build files
        progress.spinner("Scanning build files...");
        let scan = self.scan()?;
        progress.finish_and_clear();

        // Step 2: Settings checks
        self.check_settings(&request, scan.settings.as_ref())?;

        // Step 3: Propose under the read lock
        let shared = SharedDeclarationStore::new(scan.store);
        let change_set = shared.propose(&request);
        let (plan, warnings) = {
            let store = shared.read();
            let plan = self.plan_edits(&request, &change_set, &store, scan.settings.as_ref());
            (plan, relative_reference_warnings(&request, &store))
        };

        // Step 4: Check every span against disk, nothing written yet
        let prepared = plan.prepare()?;

        // Step 5: Apply to the store, all or nothing
        let applied = shared.apply(change_set)?;

        // Step 6: Write
        progress.spinner("Writing build files...");
        let written = ManifestWriter::new(self.args.dry_run).write_all(&prepared)?;
        progress.finish_and_clear();

        let files = prepared
            .into_iter()
            .filter(|file| !file.changes.is_empty())
            .map(|file| FileChange {
                written: written.was_written(&file.path),
                path: relative_to(root, &file.path),
                changes: file.changes,
            })
            .collect();

        Ok(RenameOutcome {
            old_path: request.old_path().canonical(),
            new_path: request.new_path().canonical(),
            dry_run: self.args.dry_run,
            applied,
            files,
            warnings,
            errors: scan.errors,
        })
    }

    /// Build the rename request; a path without a leading ':' is taken from the root
    fn request(&self) -> Result<RenameRequest, AppError> {
        let old_path = parse(&self.args.old_path)?;
        let old_path = old_path.resolve_against(&ModulePath::root());
        Ok(RenameRequest::new(old_path, &self.args.new_name)?)
    }

    fn uses_settings(&self) -> bool {
        self.config.rename.update_settings || self.config.rename.require_settings
    }

    /// Detect and scan every build file under the root
    pub fn scan(&self) -> Result<ProjectScan, ManifestError> {
        let files = detect_build_files(&self.args.root, &self.config.scan);
        let mut ids = DeclarationIds::new();
        let mut store = DeclarationStore::new();
        let mut errors = Vec::new();

        for info in files.iter().filter(|f| !f.is_settings()) {
            match scan_build_file(info, &mut ids) {
                Ok(outcome) => {
                    for declaration in outcome.declarations {
                        store.insert(declaration);
                    }
                    errors.extend(outcome.errors);
                }
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e);
                }
            }
        }

        let mut settings = if self.uses_settings() {
            find_settings(&files)
                .map(|info| read_settings(&info.path))
                .transpose()?
        } else {
            None
        };
        if let Some(ref mut settings) = settings {
            errors.append(&mut settings.errors);
        }

        debug!(
            files = files.len(),
            declarations = store.len(),
            errors = errors.len(),
            "scanned project"
        );
        Ok(ProjectScan {
            store,
            settings,
            files,
            errors,
        })
    }

    fn check_settings(
        &self,
        request: &RenameRequest,
        settings: Option<&SettingsFile>,
    ) -> Result<(), ManifestError> {
        let Some(settings) = settings else {
            if self.config.rename.require_settings {
                return Err(ManifestError::SettingsNotFound {
                    root: self.args.root.clone(),
                });
            }
            return Ok(());
        };

        if !settings.includes_module(request.old_path()) {
            return Err(ManifestError::ModuleNotIncluded {
                module: request.old_path().canonical(),
                settings: settings.path.clone(),
            });
        }
        let new_path = request.new_path();
        if settings.includes_module(&new_path) {
            return Err(ManifestError::ModuleAlreadyExists {
                module: new_path.canonical(),
                settings: settings.path.clone(),
            });
        }
        Ok(())
    }

    /// Text edits for every proposed change with a source location, plus the
    /// settings include when enabled
    fn plan_edits(
        &self,
        request: &RenameRequest,
        change_set: &ChangeSet,
        store: &DeclarationStore,
        settings: Option<&SettingsFile>,
    ) -> EditPlan {
        let mut plan = EditPlan::new();

        for entry in change_set.entries() {
            let Some(span) = store.get(entry.id()).and_then(|d| d.origin()) else {
                continue;
            };
            plan.add(TextEdit::new(
                span.clone(),
                entry.expected().to_string(),
                entry.proposed().to_string(),
            ));
        }

        if self.config.rename.update_settings {
            if let Some(settings) = settings {
                for include in settings.includes_of(request.old_path()) {
                    if let Some(renamed) = include.path.with_leaf(request.new_leaf_name()) {
                        plan.add(TextEdit::new(
                            include.span.clone(),
                            include.path.to_string(),
                            renamed.to_string(),
                        ));
                    }
                }
            }
        }

        debug!(edits = plan.len(), "planned edits");
        plan
    }
}

/// Relative references that resolve to the renamed module are reported, not rewritten
fn relative_reference_warnings(request: &RenameRequest, store: &DeclarationStore) -> Vec<String> {
    let mut warnings = Vec::new();
    for declaration in store.iter() {
        let target = declaration.target_path();
        if target.is_absolute() {
            continue;
        }
        let Ok(owner) = parse(declaration.owning_module()) else {
            continue;
        };
        if !target.resolve_against(&owner).same_module(request.old_path()) {
            continue;
        }

        let location = declaration
            .origin()
            .map(|span| span.to_string())
            .unwrap_or_else(|| declaration.owning_module().to_string());
        let message = format!(
            "{}: relative reference '{}' to {} was not rewritten",
            location,
            target,
            request.old_path().canonical()
        );
        warn!("{}", message);
        warnings.push(message);
    }
    warnings
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
