//! settings.gradle parsing
//!
//! Reads the `include` statements of settings.gradle and settings.gradle.kts:
//!
//! ```groovy
//! include ':app', ':lib'
//! include ':app:feature',
//!         ':app:other'
//! ```
//!
//! ```kotlin
//! include(":app", ":lib")
//! include(
//!     ":app:feature",
//!     ":app:other",
//! )
//! ```
//!
//! `includeBuild` is a composite build, not a module, and is ignored. So is
//! anything inside a comment.

use crate::domain::{ModulePath, SourceSpan};
use crate::error::ManifestError;
use crate::manifest::gradle::{line_number, Comments};
use crate::parser::path::parse;
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Start of an include statement; `\b` rules out includeBuild
static INCLUDE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*include\b[ \t]*\(?").unwrap());

// Group 1: single-quoted content, group 2: double-quoted content
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)""#).unwrap()
});

/// One module listed in an include statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInclude {
    /// Path as written; Gradle treats it as absolute even without a leading ':'
    pub path: ModulePath,
    /// Location of the literal content
    pub span: SourceSpan,
}

impl ModuleInclude {
    /// The included module as an absolute path
    pub fn module(&self) -> ModulePath {
        self.path.resolve_against(&ModulePath::root())
    }
}

/// Parsed settings file
#[derive(Debug)]
pub struct SettingsFile {
    /// Path to the settings file
    pub path: PathBuf,
    /// Included modules in file order
    pub includes: Vec<ModuleInclude>,
    /// Include entries that could not be parsed
    pub errors: Vec<ManifestError>,
}

impl SettingsFile {
    /// Find the include entries naming `module`
    pub fn includes_of<'a>(
        &'a self,
        module: &'a ModulePath,
    ) -> impl Iterator<Item = &'a ModuleInclude> + 'a {
        self.includes
            .iter()
            .filter(move |include| include.module().same_module(module))
    }

    /// Check if `module` is explicitly included
    pub fn includes_module(&self, module: &ModulePath) -> bool {
        self.includes_of(module).next().is_some()
    }
}

/// Parse the include statements of a settings file
pub fn parse_settings(content: &str, file: &Path) -> SettingsFile {
    let mut settings = SettingsFile {
        path: file.to_path_buf(),
        includes: Vec::new(),
        errors: Vec::new(),
    };
    let comments = Comments::find(content);

    for start in INCLUDE_START.find_iter(content) {
        if comments.contains(start.end() - 1) {
            continue;
        }
        // include( ... ) runs to its closing paren, across lines
        let mut depth = usize::from(start.as_str().ends_with('('));
        let mut pos = start.end();
        loop {
            let line_end = content[pos..]
                .find('\n')
                .map(|i| pos + i)
                .unwrap_or(content.len());
            let mut segment_end = line_end;
            if depth > 0 {
                let (remaining, close) = track_parens(content, pos..line_end, &comments, depth);
                depth = remaining;
                if let Some(close) = close {
                    segment_end = close;
                }
            }

            for caps in STRING_LITERAL.captures_iter(&content[pos..segment_end]) {
                let Some(literal) = caps.get(1).or_else(|| caps.get(2)) else {
                    continue;
                };
                let (begin, end) = (pos + literal.start(), pos + literal.end());
                if comments.contains(begin) {
                    continue;
                }
                let line = line_number(content, begin);
                match parse(literal.as_str()) {
                    Ok(path) => settings.includes.push(ModuleInclude {
                        path,
                        span: SourceSpan::new(file, begin, end, line),
                    }),
                    Err(e) => settings
                        .errors
                        .push(ManifestError::malformed_declaration(file, line, e)),
                }
            }

            // Without parens, a trailing comma continues the statement
            let continues = if segment_end < line_end {
                false
            } else {
                depth > 0 || ends_with_comma(content, pos..line_end, &comments)
            };
            if !continues || line_end >= content.len() {
                break;
            }
            pos = line_end + 1;
        }
    }

    settings
}

/// Follow parentheses in `range`, skipping literals and comments.
/// Returns the remaining depth and the position of the paren that closes the statement.
fn track_parens(
    content: &str,
    range: Range<usize>,
    comments: &Comments,
    mut depth: usize,
) -> (usize, Option<usize>) {
    let mut quote = None;
    let mut escaped = false;

    for (i, c) in content[range.clone()].char_indices() {
        let at = range.start + i;
        if comments.contains(at) {
            continue;
        }
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (0, Some(at));
                }
            }
            _ => {}
        }
    }

    (depth, None)
}

/// Check if the last code character in `range` is a comma
fn ends_with_comma(content: &str, range: Range<usize>, comments: &Comments) -> bool {
    content[range.clone()]
        .char_indices()
        .rev()
        .map(|(i, c)| (range.start + i, c))
        .find(|&(at, c)| !c.is_whitespace() && !comments.contains(at))
        .is_some_and(|(_, c)| c == ',')
}

/// Read and parse a settings file
pub fn read_settings(path: &Path) -> Result<SettingsFile, ManifestError> {
    let content = super::read_manifest(path)?;
    Ok(parse_settings(&content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(content: &str) -> SettingsFile {
        parse_settings(content, Path::new("settings.gradle"))
    }

    fn included(settings: &SettingsFile) -> Vec<String> {
        settings
            .includes
            .iter()
            .map(|i| i.path.to_string())
            .collect()
    }

    #[test]
    fn test_parse_groovy_includes() {
        let content = r#"
rootProject.name = 'demo'
include ':app', ':lib'
include ':app:feature'
"#;
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":app", ":lib", ":app:feature"]);
        assert_eq!(settings.includes[2].span.line, 4);
    }

    #[test]
    fn test_parse_kotlin_includes() {
        let settings = parse_str("include(\":app\", \":lib\")\n");
        assert_eq!(included(&settings), vec![":app", ":lib"]);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let content = "include ':a',\n        ':b', // core\n        ':c'\ninclude ':d'\nprintln ':e'\n";
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":a", ":b", ":c", ":d"]);
    }

    #[test]
    fn test_parse_multiline_kotlin_include() {
        let content = "rootProject.name = \"demo\"\ninclude(\n    \":app\",\n    \":lib\"\n)\n";
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":app", ":lib"]);
        assert_eq!(settings.includes[1].span.line, 4);
        assert!(settings.includes_module(&ModulePath::absolute(["lib"])));
    }

    #[test]
    fn test_parse_multiline_include_stops_at_closing_paren() {
        let content = r#"include(
    ":app", // (main) don't
    // ":old",
    ":lib",
)
println(":not-a-module")
include(":core")
"#;
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":app", ":lib", ":core"]);
    }

    #[test]
    fn test_ignores_block_comments() {
        let content = "/*\ninclude ':old'\n*/\ninclude ':app', /* ':gone', */ ':lib'\n";
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":app", ":lib"]);
    }

    #[test]
    fn test_ignores_include_build_and_comments() {
        let content = "includeBuild '../plugins'\n// include ':old'\ninclude ':app' // ':commented'\n";
        let settings = parse_str(content);
        assert_eq!(included(&settings), vec![":app"]);
    }

    #[test]
    fn test_relative_include_is_absolute_module() {
        let settings = parse_str("include 'app:feature'\n");
        let include = &settings.includes[0];
        assert!(!include.path.is_absolute());
        assert_eq!(include.module(), ModulePath::absolute(["app", "feature"]));
        assert!(settings.includes_module(&ModulePath::absolute(["app", "feature"])));
    }

    #[test]
    fn test_includes_module_exact_only() {
        let settings = parse_str("include ':app:featureX'\n");
        assert!(!settings.includes_module(&ModulePath::absolute(["app", "feature"])));
        assert!(!settings.includes_module(&ModulePath::absolute(["app"])));
    }

    #[test]
    fn test_span_points_at_literal() {
        let content = "include ': app '\n";
        let settings = parse_str(content);
        let span = &settings.includes[0].span;
        assert_eq!(&content[span.range()], ": app ");
    }

    #[test]
    fn test_malformed_include() {
        let settings = parse_str("include ':a', \":${b}\"\n");
        assert_eq!(included(&settings), vec![":a"]);
        assert_eq!(settings.errors.len(), 1);
    }
}
