//! Module path value types
//!
//! A module path keeps the exact text it was parsed from, so a rename can be
//! written back without disturbing whitespace or escapes around it.

use crate::parser::path::{escape, serialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between module path segments
pub const PATH_SEPARATOR: char = ':';

/// A single segment of a module path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Raw text between separators, including surrounding whitespace and escapes
    raw: String,
    /// Trimmed and unescaped name
    name: String,
}

impl Segment {
    pub(crate) fn from_parts(raw: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            name: name.into(),
        }
    }

    /// Creates a segment from a plain name, escaping it as needed
    pub fn named(name: &str) -> Self {
        Self::from_parts(escape(name), name)
    }

    /// Raw text as it appeared in the source
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Segment name without padding or escapes
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whitespace before the name
    pub fn leading_whitespace(&self) -> &str {
        let trimmed = self.raw.trim_start();
        &self.raw[..self.raw.len() - trimmed.len()]
    }

    /// Whitespace after the name
    pub fn trailing_whitespace(&self) -> &str {
        let trimmed = self.raw.trim_end();
        &self.raw[trimmed.len()..]
    }

    /// Returns a segment carrying `new_name` inside this segment's padding
    pub fn renamed(&self, new_name: &str) -> Self {
        Self::from_parts(
            format!(
                "{}{}{}",
                self.leading_whitespace(),
                escape(new_name),
                self.trailing_whitespace()
            ),
            new_name,
        )
    }
}

/// Colon-separated Gradle module path such as `:app:feature`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModulePath {
    /// Whitespace before the leading separator of an absolute path
    prefix: String,
    /// Whether the path starts with the separator
    absolute: bool,
    /// Path segments, root first
    segments: Vec<Segment>,
}

impl ModulePath {
    pub(crate) fn from_parts(prefix: impl Into<String>, absolute: bool, segments: Vec<Segment>) -> Self {
        Self {
            prefix: prefix.into(),
            absolute,
            segments,
        }
    }

    /// The root project path `:`
    pub fn root() -> Self {
        Self::from_parts("", true, Vec::new())
    }

    /// Builds an absolute path from plain segment names
    pub fn absolute<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = names
            .into_iter()
            .map(|n| Segment::named(n.as_ref()))
            .collect();
        Self::from_parts("", true, segments)
    }

    /// Returns true for the root project path
    pub fn is_root(&self) -> bool {
        self.absolute && self.segments.is_empty()
    }

    /// Returns true if the path starts with the separator
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Whitespace captured before the leading separator
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment names, root first
    pub fn names(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::name).collect()
    }

    /// Name of the last segment, `None` for the root path
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(Segment::name)
    }

    /// Compares two paths by absoluteness and segment names, ignoring formatting
    pub fn same_module(&self, other: &ModulePath) -> bool {
        self.absolute == other.absolute
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.name == b.name)
    }

    /// Returns a copy with the last segment renamed, keeping every other byte.
    /// The root path has no leaf and yields `None`.
    pub fn with_leaf(&self, new_name: &str) -> Option<Self> {
        let (last, parents) = self.segments.split_last()?;
        let mut segments = parents.to_vec();
        segments.push(last.renamed(new_name));
        Some(Self::from_parts(self.prefix.clone(), self.absolute, segments))
    }

    /// Appends a child segment
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::named(name));
        Self::from_parts(self.prefix.clone(), self.absolute, segments)
    }

    /// Resolves a relative path against the module that declares it.
    /// Absolute paths are returned unchanged.
    pub fn resolve_against(&self, owner: &ModulePath) -> Self {
        if self.absolute {
            return self.clone();
        }
        let mut segments = owner.segments.clone();
        segments.extend(self.segments.iter().cloned());
        Self::from_parts(owner.prefix.clone(), true, segments)
    }

    /// Normalized form without whitespace, e.g. `:app:feature`.
    /// Names are escaped, so `canonical` parses back to the same module.
    pub fn canonical(&self) -> String {
        let names = self
            .segments
            .iter()
            .map(|segment| escape(segment.name()))
            .collect::<Vec<_>>()
            .join(":");
        if self.absolute {
            format!("{}{}", PATH_SEPARATOR, names)
        } else {
            names
        }
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
