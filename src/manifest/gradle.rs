//! Gradle build file scanner
//!
//! Handles:
//! - build.gradle (Groovy DSL) and build.gradle.kts (Kotlin DSL)
//! - String notation: implementation project(':lib'), implementation(project(":lib"))
//! - Map notation: api project(path: ':lib', configuration: 'default')
//! - Kotlin named arguments: implementation(project(path = ":lib"))
//! - Wrappers: implementation platform(project(':bom')), testFixtures(project(':x'))
//!
//! Declarations inside `//` and `/* */` comments are skipped. Every path
//! literal is parsed with the module path codec. A malformed path is reported
//! for that declaration only and scanning continues.

use crate::domain::{DeclarationIds, DependencyDeclaration, ModulePath, SourceSpan};
use crate::error::ManifestError;
use crate::parser::path::parse;
use regex::{Captures, Regex};
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Scanner for project dependencies in build.gradle and build.gradle.kts files
#[derive(Debug, Default, Clone, Copy)]
pub struct GradleScanner;

/// Declarations found in one build file
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Successfully parsed declarations, in file order
    pub declarations: Vec<DependencyDeclaration>,
    /// Declarations whose path could not be parsed
    pub errors: Vec<ManifestError>,
}

impl ScanOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// Regex patterns for Gradle DSL

// configuration [(] [platform(] project( args ), configuration may be quoted (Kotlin)
// Group 1: configuration name, group 2: arguments of project(...)
static PROJECT_DEPENDENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)(?:^|[{;])[ \t]*"?(\w+)"?[ \t]*\(?[ \t]*(?:(?:platform|enforcedPlatform|testFixtures)[ \t]*\([ \t]*)?project[ \t]*\(([^)\n]*)\)"#,
    )
    .unwrap()
});

// Quoted string literal, single or double quotes, backslash escapes allowed
// Group 1: single-quoted content, group 2: double-quoted content
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)""#).unwrap()
});

// Named argument: path: ':lib' (Groovy) or path = ":lib" (Kotlin)
// Group 1: argument name, groups 2/3: literal content
static NAMED_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)[ \t]*[:=][ \t]*(?:'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)")"#).unwrap()
});

// Words that may precede project(...) without being a dependency configuration
const NON_CONFIGURATIONS: [&str; 8] = [
    "project",
    "rootProject",
    "findProject",
    "configure",
    "evaluationDependsOn",
    "dependsOn",
    "apply",
    "return",
];

/// A path literal found inside project(...), with its byte range in the file
struct PathLiteral<'a> {
    text: &'a str,
    range: Range<usize>,
    target_configuration: Option<&'a str>,
}

impl GradleScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan build file content for project dependencies
    ///
    /// `owning_module` is the module the build file belongs to. Every
    /// declaration gets a fresh id from `ids`.
    pub fn scan(
        &self,
        content: &str,
        owning_module: &ModulePath,
        file: &Path,
        ids: &mut DeclarationIds,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let owner = owning_module.canonical();
        let comments = Comments::find(content);

        for caps in PROJECT_DEPENDENCY.captures_iter(content) {
            let (Some(configuration), Some(args)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let configuration = configuration.as_str();
            if NON_CONFIGURATIONS.contains(&configuration)
                || comments.contains(configuration_start(&caps))
            {
                continue;
            }

            let Some(literal) = find_path_literal(args.as_str(), args.start()) else {
                debug!(file = %file.display(), "skipping project() without a literal path");
                continue;
            };
            let line = line_number(content, literal.range.start);

            match parse(literal.text) {
                Ok(target) => {
                    let span = SourceSpan::new(file, literal.range.start, literal.range.end, line);
                    let mut declaration =
                        DependencyDeclaration::new(ids.next_id(), owner.as_str(), configuration, target)
                            .with_origin(span);
                    if let Some(target_configuration) = literal.target_configuration {
                        declaration = declaration.with_target_configuration(target_configuration);
                    }
                    debug!(file = %file.display(), line, "found {}", declaration);
                    outcome.declarations.push(declaration);
                }
                Err(e) => {
                    outcome
                        .errors
                        .push(ManifestError::malformed_declaration(file, line, e));
                }
            }
        }

        outcome
    }
}

fn configuration_start(caps: &Captures<'_>) -> usize {
    caps.get(1).map(|m| m.start()).unwrap_or(0)
}

/// Find the target path inside project(...) arguments
///
/// Named arguments win over positional ones. `offset` is the position of
/// `args` in the file.
fn find_path_literal(args: &str, offset: usize) -> Option<PathLiteral<'_>> {
    let mut path = None;
    let mut target_configuration = None;

    for caps in NAMED_ARGUMENT.captures_iter(args) {
        let Some(value) = caps.get(2).or_else(|| caps.get(3)) else {
            continue;
        };
        match caps.get(1).map(|m| m.as_str()) {
            Some("path") => path = Some(value),
            Some("configuration") => target_configuration = Some(value.as_str()),
            _ => {}
        }
    }

    if path.is_none() {
        // project(':lib') or project(":lib", "configuration")
        let mut positional = STRING_LITERAL
            .captures_iter(args)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)));
        path = positional.next();
        if let Some(configuration) = positional.next() {
            target_configuration = Some(configuration.as_str());
        }
    }

    path.map(|m| PathLiteral {
        text: m.as_str(),
        range: offset + m.start()..offset + m.end(),
        target_configuration,
    })
}

/// Check if `pos` sits after a `//` on its line
/// Byte ranges of the `//` and `/* */` comments in a build script.
/// Comment markers inside string literals do not count.
#[derive(Debug, Default)]
pub(crate) struct Comments {
    ranges: Vec<Range<usize>>,
}

impl Comments {
    pub(crate) fn find(content: &str) -> Self {
        let bytes = content.as_bytes();
        let mut ranges = Vec::new();
        let mut quote = None;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            if let Some(q) = quote {
                match b {
                    b'\\' => i += 1,
                    // Single-line literals only
                    b'\n' => quote = None,
                    _ if b == q => quote = None,
                    _ => {}
                }
                i += 1;
                continue;
            }

            let end = match (b, bytes.get(i + 1)) {
                (b'\'' | b'"', _) => {
                    quote = Some(b);
                    i += 1;
                    continue;
                }
                (b'/', Some(b'/')) => content[i..].find('\n').map_or(bytes.len(), |n| i + n),
                (b'/', Some(b'*')) => content[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |n| i + 2 + n + 2),
                _ => {
                    i += 1;
                    continue;
                }
            };
            ranges.push(i..end);
            i = end;
        }

        Self { ranges }
    }

    /// Check if the byte at `pos` is inside a comment
    pub(crate) fn contains(&self, pos: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= pos);
        self.ranges.get(idx).is_some_and(|r| r.contains(&pos))
    }
}

/// 1-based line number of a byte offset
pub(crate) fn line_number(content: &str, pos: usize) -> usize {
    content[..pos].matches('\n').count() + 1
}
