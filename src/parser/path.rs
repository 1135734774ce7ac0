//! Module path codec
//!
//! Grammar: optional whitespace, an optional leading `:`, then segments
//! separated by `:`. Every segment keeps its raw text so that
//! `serialize(parse(s)) == s` for any well-formed `s`.
//!
//! Reserved characters (`"`, `'`, `` ` ``, `$`) may only appear escaped with a
//! backslash. A backslash may escape a reserved character, the separator or
//! another backslash.

use crate::domain::{ModulePath, Segment, PATH_SEPARATOR};
use crate::error::PathError;

/// Characters that must be escaped inside a segment
pub const RESERVED_CHARACTERS: [char; 4] = ['"', '\'', '`', '$'];

/// Escape character
pub const ESCAPE: char = '\\';

fn is_escapable(ch: char) -> bool {
    ch == PATH_SEPARATOR || ch == ESCAPE || RESERVED_CHARACTERS.contains(&ch)
}

/// Parse a module path string
pub fn parse(text: &str) -> Result<ModulePath, PathError> {
    if text.trim().is_empty() {
        return Err(PathError::empty(text));
    }

    let body_start = text.len() - text.trim_start().len();
    let (prefix, absolute, rest_start) = match text[body_start..].strip_prefix(PATH_SEPARATOR) {
        Some(_) => (&text[..body_start], true, body_start + PATH_SEPARATOR.len_utf8()),
        None => ("", false, 0),
    };

    let rest = &text[rest_start..];
    if absolute && rest.is_empty() {
        return Ok(ModulePath::from_parts(prefix, true, Vec::new()));
    }

    let mut segments = Vec::new();
    for (index, raw) in split_segments(text, rest_start)?.into_iter().enumerate() {
        let name = unescape(raw.trim());
        if name.is_empty() {
            return Err(PathError::EmptySegment {
                text: text.to_string(),
                index,
            });
        }
        segments.push(Segment::from_parts(raw, name));
    }

    Ok(ModulePath::from_parts(prefix, absolute, segments))
}

/// Serialize a module path back to text
pub fn serialize(path: &ModulePath) -> String {
    let mut out = String::from(path.prefix());
    if path.is_absolute() {
        out.push(PATH_SEPARATOR);
    }
    let raws: Vec<&str> = path.segments().iter().map(Segment::raw).collect();
    out.push_str(&raws.join(&PATH_SEPARATOR.to_string()));
    out
}

/// Escape a plain name so it can be stored as a segment
pub fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if is_escapable(ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Split the text after `start` on unescaped separators
fn split_segments(text: &str, start: usize) -> Result<Vec<&str>, PathError> {
    let mut segments = Vec::new();
    let mut segment_start = start;
    let mut chars = text[start..].char_indices().peekable();

    while let Some((rel, ch)) = chars.next() {
        let offset = start + rel;
        if ch == ESCAPE {
            match chars.next() {
                Some((_, next)) if is_escapable(next) => {}
                Some((next_rel, next)) => {
                    return Err(PathError::InvalidEscape {
                        text: text.to_string(),
                        ch: next,
                        offset: start + next_rel,
                    });
                }
                None => return Err(PathError::dangling_escape(text)),
            }
        } else if ch == PATH_SEPARATOR {
            segments.push(&text[segment_start..offset]);
            segment_start = offset + ch.len_utf8();
        } else if RESERVED_CHARACTERS.contains(&ch) {
            return Err(PathError::ReservedCharacter {
                text: text.to_string(),
                ch,
                offset,
            });
        }
    }
    segments.push(&text[segment_start..]);

    Ok(segments)
}

/// Drop escape characters, keeping the escaped character
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
