//! Application error types using thiserror
//!
//! Error hierarchy:
//! - PathError: Malformed module path text
//! - RenameError: Invalid rename requests
//! - ApplyError: Change sets that no longer match the declaration store
//! - ManifestError: Issues with Gradle build and settings files
//! - ConfigError: Issues with CLI and project configuration

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DeclarationId;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Module path related errors
    #[error(transparent)]
    Path(#[from] PathError),

    /// Rename request related errors
    #[error(transparent)]
    Rename(#[from] RenameError),

    /// Change set application errors
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Build file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Malformed module path text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Nothing but whitespace
    #[error("malformed module path '{text}': path is empty")]
    Empty { text: String },

    /// Unescaped reserved character inside a segment
    #[error("malformed module path '{text}': reserved character '{ch}' at offset {offset}")]
    ReservedCharacter {
        text: String,
        ch: char,
        offset: usize,
    },

    /// Segment with no name between separators
    #[error("malformed module path '{text}': segment {index} is empty")]
    EmptySegment { text: String, index: usize },

    /// Backslash followed by a character that cannot be escaped
    #[error("malformed module path '{text}': invalid escape '\\{ch}' at offset {offset}")]
    InvalidEscape {
        text: String,
        ch: char,
        offset: usize,
    },

    /// Backslash at the very end of the path
    #[error("malformed module path '{text}': dangling escape at end of path")]
    DanglingEscape { text: String },
}

/// Invalid rename requests, rejected before any matching happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("new module name must not be empty")]
    EmptyLeafName,

    #[error("new module name '{name}' must not contain the path separator ':'")]
    SeparatorInLeafName { name: String },

    #[error("new module name '{name}' contains reserved character '{ch}'")]
    ReservedCharacter { name: String, ch: char },

    #[error("can't rename root module")]
    RootModule,

    #[error("module '{path}' is already named '{name}'")]
    UnchangedName { path: String, name: String },

    #[error("invalid module path: {0}")]
    InvalidPath(#[from] PathError),
}

/// Errors raised while applying a change set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The store changed between propose and apply
    #[error("stale change set: declaration {id} {reason}")]
    StaleChangeSet {
        id: DeclarationId,
        reason: StaleReason,
    },
}

/// Why a change set entry no longer matches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// Declaration was removed
    Missing,
    /// Declaration now targets another path
    PathChanged { expected: String, found: String },
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::Missing => write!(f, "no longer exists"),
            StaleReason::PathChanged { expected, found } => {
                write!(f, "now targets '{}' (expected '{}')", found, expected)
            }
        }
    }
}

/// Errors related to Gradle build and settings files
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Build file not found
    #[error("build file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read build file
    #[error("failed to read build file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write build file
    #[error("failed to write build file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declaration whose module path could not be parsed
    #[error("{path}:{line}: {source}")]
    MalformedDeclaration {
        path: PathBuf,
        line: usize,
        #[source]
        source: PathError,
    },

    /// File content changed since it was scanned
    #[error("{path}:{line}: file changed since it was scanned (expected '{expected}', found '{found}')")]
    StaleFile {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },

    /// Two edits touch the same bytes
    #[error("{path}:{line}: overlapping edits")]
    OverlappingEdits { path: PathBuf, line: usize },

    /// No settings.gradle(.kts) in the project root
    #[error("settings.gradle file not found in {root}")]
    SettingsNotFound { root: PathBuf },

    /// Module is not included in settings
    #[error("can't find module '{module}' in {settings}")]
    ModuleNotIncluded { module: String, settings: PathBuf },

    /// Target module is already included in settings
    #[error("module '{module}' already exists in {settings}")]
    ModuleAlreadyExists { module: String, settings: PathBuf },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl PathError {
    /// Creates a new Empty error
    pub fn empty(text: impl Into<String>) -> Self {
        PathError::Empty { text: text.into() }
    }

    /// Creates a new DanglingEscape error
    pub fn dangling_escape(text: impl Into<String>) -> Self {
        PathError::DanglingEscape { text: text.into() }
    }
}

impl RenameError {
    /// Creates a new SeparatorInLeafName error
    pub fn separator_in_leaf_name(name: impl Into<String>) -> Self {
        RenameError::SeparatorInLeafName { name: name.into() }
    }
}

impl ApplyError {
    /// Creates a StaleChangeSet error for a removed declaration
    pub fn missing(id: DeclarationId) -> Self {
        ApplyError::StaleChangeSet {
            id,
            reason: StaleReason::Missing,
        }
    }

    /// Creates a StaleChangeSet error for a declaration whose path changed
    pub fn path_changed(
        id: DeclarationId,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ApplyError::StaleChangeSet {
            id,
            reason: StaleReason::PathChanged {
                expected: expected.into(),
                found: found.into(),
            },
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new MalformedDeclaration error
    pub fn malformed_declaration(path: impl Into<PathBuf>, line: usize, source: PathError) -> Self {
        ManifestError::MalformedDeclaration {
            path: path.into(),
            line,
            source,
        }
    }

    /// Creates a new StaleFile error
    pub fn stale_file(
        path: impl Into<PathBuf>,
        line: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ManifestError::StaleFile {
            path: path.into(),
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ConflictingOptions error
    pub fn conflicting_options(message: impl Into<String>) -> Self {
        ConfigError::ConflictingOptions {
            message: message.into(),
        }
    }
}
