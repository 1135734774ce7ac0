//! Rename request validation

use super::{ModulePath, PATH_SEPARATOR};
use crate::error::RenameError;
use crate::parser::path::{self, ESCAPE, RESERVED_CHARACTERS};
use std::fmt;

/// A validated request to rename the last segment of a module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    old_path: ModulePath,
    new_leaf_name: String,
}

impl RenameRequest {
    /// Validates and creates a request.
    ///
    /// The new name is trimmed. Empty names, names containing the separator or
    /// reserved characters, the root path and unchanged names are rejected.
    pub fn new(old_path: ModulePath, new_leaf_name: &str) -> Result<Self, RenameError> {
        let name = new_leaf_name.trim();
        if name.is_empty() {
            return Err(RenameError::EmptyLeafName);
        }
        if name.contains(PATH_SEPARATOR) {
            return Err(RenameError::separator_in_leaf_name(name));
        }
        if let Some(ch) = name
            .chars()
            .find(|c| *c == ESCAPE || RESERVED_CHARACTERS.contains(c))
        {
            return Err(RenameError::ReservedCharacter {
                name: name.to_string(),
                ch,
            });
        }

        let Some(leaf) = old_path.leaf() else {
            return Err(RenameError::RootModule);
        };
        if leaf == name {
            return Err(RenameError::UnchangedName {
                path: old_path.canonical(),
                name: name.to_string(),
            });
        }

        Ok(Self {
            old_path,
            new_leaf_name: name.to_string(),
        })
    }

    /// Parses the old path and validates the request
    pub fn parse(old_path: &str, new_leaf_name: &str) -> Result<Self, RenameError> {
        let old_path = path::parse(old_path)?;
        Self::new(old_path, new_leaf_name)
    }

    pub fn old_path(&self) -> &ModulePath {
        &self.old_path
    }

    pub fn new_leaf_name(&self) -> &str {
        &self.new_leaf_name
    }

    /// The old path with its leaf replaced
    pub fn new_path(&self) -> ModulePath {
        self.rewrite(&self.old_path)
            .unwrap_or_else(|| self.old_path.child(&self.new_leaf_name))
    }

    /// Applies the rename rule to `path`; `None` when `path` is a different module
    pub fn rewrite(&self, path: &ModulePath) -> Option<ModulePath> {
        if !path.same_module(&self.old_path) {
            return None;
        }
        path.with_leaf(&self.new_leaf_name)
    }
}

impl fmt::Display for RenameRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.old_path.canonical(),
            self.new_path().canonical()
        )
    }
}
