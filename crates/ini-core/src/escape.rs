//! Line-level escaping shared by the encoder and decoder.
//!
//! [`safe`] turns a scalar into text that fits on one line after `key = `,
//! [`unsafe_value`] turns that text back into a value. Two representations
//! are in play:
//!
//! - **JSON literal**: anything that is not a plain string, or a string that
//!   would be ambiguous on the line (contains `=` or a newline, starts with
//!   `[`, looks already quoted, has surrounding whitespace), is written as
//!   its JSON form: `"a=b"`, `42`, `true`.
//! - **Plain text**: everything else is written as-is, with `;` and `#`
//!   escaped so they are not taken as the start of a trailing comment.
//!
//! ```
//! use ini_core::{safe, unsafe_value};
//! use serde_json::json;
//!
//! assert_eq!(safe(&json!("plain")), "plain");
//! assert_eq!(safe(&json!("has=sign")), r#""has=sign""#);
//! assert_eq!(safe(&json!("a;b")), r"a\;b");
//!
//! assert_eq!(unsafe_value(r"a\;b ; trailing comment"), json!("a;b"));
//! assert_eq!(unsafe_value(r#""has=sign""#), json!("has=sign"));
//! ```

use crate::error::{IniError, Result};
use serde_json::Value;

/// Return the line-safe textual form of a scalar.
pub fn safe(value: &Value) -> String {
    match value {
        Value::String(s) => safe_str(s),
        other => other.to_string(),
    }
}

/// [`safe`] for a borrowed string, used for keys and section names.
pub fn safe_str(s: &str) -> String {
    if needs_quoting(s) {
        Value::from(s).to_string()
    } else {
        escape_comment_chars(s)
    }
}

/// Recover a value from the raw text after `=`.
///
/// A quoted literal that is not valid JSON is logged and returned as the text
/// between the quotes (single quotes) or as-is (double quotes). Use
/// [`try_unsafe_value`] to get the failure instead.
pub fn unsafe_value(text: &str) -> Value {
    match RawValue::classify(text) {
        RawValue::Plain(s) => Value::String(unescape_plain(s)),
        RawValue::Quoted(json) => parse_quoted(json).unwrap_or_else(|err| {
            tracing::warn!(value = json, error = %err, "malformed quoted value, keeping raw text");
            Value::String(json.to_string())
        }),
    }
}

/// Like [`unsafe_value`], but a malformed quoted literal is an error.
pub fn try_unsafe_value(text: &str) -> Result<Value> {
    match RawValue::classify(text) {
        RawValue::Plain(s) => Ok(Value::String(unescape_plain(s))),
        RawValue::Quoted(json) => parse_quoted(json).map_err(|err| IniError::QuotedValue {
            line: 0,
            message: err.to_string(),
        }),
    }
}

/// The two shapes a raw value can take once trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawValue<'a> {
    /// JSON literal text, with a wrapping pair of single quotes already removed.
    Quoted(&'a str),
    /// Escaped plain text, possibly followed by a comment.
    Plain(&'a str),
}

impl<'a> RawValue<'a> {
    pub(crate) fn classify(text: &'a str) -> Self {
        let text = text.trim();
        if !is_quoted(text) {
            return RawValue::Plain(text);
        }
        match text.strip_prefix('\'') {
            Some(inner) => RawValue::Quoted(&inner[..inner.len() - 1]),
            None => RawValue::Quoted(text),
        }
    }
}

pub(crate) fn parse_quoted(json: &str) -> std::result::Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Undo `\;`, `\#` and `\\`, stopping at the first unescaped `;` or `#`.
/// Unknown escapes are kept verbatim, backslash included. Whitespace before a
/// stripped comment is dropped.
pub(crate) fn unescape_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            if !matches!(c, '\\' | ';' | '#') {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
        } else {
            match c {
                ';' | '#' => {
                    let kept = out.trim_end().len();
                    out.truncate(kept);
                    break;
                }
                '\\' => escaped = true,
                _ => out.push(c),
            }
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}

/// Wrapped in a matching pair of `"` or `'`.
pub(crate) fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
}

fn needs_quoting(s: &str) -> bool {
    s.contains(['\r', '\n', '='])
        || s.starts_with('[')
        || is_quoted(s)
        || s != s.trim()
}

// A backslash is doubled only where `unescape_plain` would otherwise read it
// as the start of an escape it understands.
fn escape_comment_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ';' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '\\' if matches!(chars.peek(), Some('\\' | ';' | '#')) => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_strips_single_quotes_only() {
        assert_eq!(RawValue::classify("'42'"), RawValue::Quoted("42"));
        assert_eq!(RawValue::classify(r#""x""#), RawValue::Quoted(r#""x""#));
        assert_eq!(RawValue::classify("  x  "), RawValue::Plain("x"));
    }

    #[test]
    fn lone_quote_is_plain() {
        assert_eq!(RawValue::classify("\""), RawValue::Plain("\""));
    }

    #[test]
    fn backslash_doubling_is_minimal() {
        assert_eq!(escape_comment_chars(r"C:\dir\file"), r"C:\dir\file");
        assert_eq!(escape_comment_chars(r"a\;"), r"a\\\;");
        assert_eq!(unescape_plain(r"a\\\;"), r"a\;");
    }
}
