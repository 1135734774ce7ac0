//! Dependency declaration structures

use super::ModulePath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Stable identity of a declaration, independent of its current target path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeclarationId(u64);

impl DeclarationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out unique declaration ids
#[derive(Debug, Default)]
pub struct DeclarationIds {
    next: u64,
}

impl DeclarationIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused id
    pub fn next_id(&mut self) -> DeclarationId {
        let id = DeclarationId(self.next);
        self.next += 1;
        id
    }
}

/// Location of a path literal inside a build file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// File containing the literal
    pub file: PathBuf,
    /// Byte offset of the first character inside the quotes
    pub start: usize,
    /// Byte offset one past the last character inside the quotes
    pub end: usize,
    /// Line number (1-based)
    pub line: usize,
}

impl SourceSpan {
    pub fn new(file: impl Into<PathBuf>, start: usize, end: usize, line: usize) -> Self {
        Self {
            file: file.into(),
            start,
            end,
            line,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One dependency edge from an owning module to a target module.
///
/// Declarations are immutable values. A rename produces a new value through
/// [`DependencyDeclaration::with_target_path`] that keeps the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    id: DeclarationId,
    /// Module whose build file holds the declaration (e.g. `:app`)
    owning_module: String,
    /// Configuration name (e.g. `implementation`)
    configuration: String,
    /// Referenced module path
    target_path: ModulePath,
    /// Configuration of the target module, if one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    target_configuration: Option<String>,
    /// Where the target path literal lives in the source
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<SourceSpan>,
}

impl DependencyDeclaration {
    /// Creates a new declaration
    pub fn new(
        id: DeclarationId,
        owning_module: impl Into<String>,
        configuration: impl Into<String>,
        target_path: ModulePath,
    ) -> Self {
        Self {
            id,
            owning_module: owning_module.into(),
            configuration: configuration.into(),
            target_path,
            target_configuration: None,
            origin: None,
        }
    }

    /// Sets the target configuration (builder pattern)
    pub fn with_target_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.target_configuration = Some(configuration.into());
        self
    }

    /// Sets the source location (builder pattern)
    pub fn with_origin(mut self, origin: SourceSpan) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Returns a copy pointing at `path`; `self` is left untouched
    pub fn with_target_path(&self, path: ModulePath) -> Self {
        Self {
            target_path: path,
            ..self.clone()
        }
    }

    pub fn id(&self) -> DeclarationId {
        self.id
    }

    pub fn owning_module(&self) -> &str {
        &self.owning_module
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    pub fn target_path(&self) -> &ModulePath {
        &self.target_path
    }

    pub fn target_configuration(&self) -> Option<&str> {
        self.target_configuration.as_deref()
    }

    pub fn origin(&self) -> Option<&SourceSpan> {
        self.origin.as_ref()
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} project('{}')",
            self.owning_module, self.configuration, self.target_path
        )?;
        if let Some(ref configuration) = self.target_configuration {
            write!(f, " [{}]", configuration)?;
        }
        Ok(())
    }
}
