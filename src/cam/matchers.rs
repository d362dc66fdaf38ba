//! Line shape matchers for the CAM job format.
//!
//! The single-line matchers are pure functions over a peeked line. The
//! cursor-level functions ([`repeated_localized`] and [`field`]) apply them
//! through [`LineCursor::take`], consuming one line per match.
//!
//! # Line Shapes
//!
//! ```text
//! Key=value
//! Key="quoted value"
//! Key[en]="localized value"
//! [Bracketed]
//! ```

use super::cursor::LineCursor;
use super::field::{FieldValue, Localized};

/// Matches `key=value`, returning the remainder after `=`.
#[must_use]
pub fn key_equals_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix('=')
}

/// Matches `key="value"`, returning the text between the quotes.
#[must_use]
pub fn key_equals_quoted<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    unquote(key_equals_value(line, key)?)
}

/// Matches `key[lang]="value"`, returning `(lang, value)`.
#[must_use]
pub fn key_lang_equals_quoted<'a>(line: &'a str, key: &str) -> Option<(&'a str, &'a str)> {
    let rest = line.strip_prefix(key)?.strip_prefix('[')?;
    let (lang, value) = rest.split_once("]=")?;
    if lang.is_empty() {
        return None;
    }
    Some((lang, unquote(value)?))
}

/// Matches a line of the form `[content]`, returning the content.
#[must_use]
pub fn bracketed(line: &str) -> Option<&str> {
    let content = line.strip_prefix('[')?.strip_suffix(']')?;
    (!content.is_empty()).then_some(content)
}

fn unquote(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

/// Consumes consecutive `key[lang]="value"` lines.
///
/// Returns an empty map when the current line does not match.
pub fn repeated_localized(cursor: &mut LineCursor<'_>, key: &str) -> Localized {
    let mut values = Localized::new();
    while let Some((lang, value)) = cursor.take(|line| key_lang_equals_quoted(line, key)) {
        values.insert(lang.to_string(), value.to_string());
    }
    values
}

/// Consumes a field written in any of the accepted shapes.
///
/// The localized form is tried first, then the quoted form, then the plain
/// form.
pub fn field(cursor: &mut LineCursor<'_>, key: &str) -> Option<FieldValue> {
    let localized = repeated_localized(cursor, key);
    if !localized.is_empty() {
        return Some(FieldValue::Localized(localized));
    }
    cursor
        .take(|line| key_equals_quoted(line, key).or_else(|| key_equals_value(line, key)))
        .map(FieldValue::from)
}
