//! INI Encoder — converts a JSON object into INI text.
//!
//! - **Scalars**: `key = value`, with the value made line-safe by [`safe`]
//! - **Arrays**: one `key[] = value` line per element
//! - **Objects**: a `[section]` block, named by the dot-joined path from the
//!   root; keys containing dots are escaped (`\.`) so the path stays unambiguous
//! - **Ordering**: a section's own fields come before its child sections, and
//!   blocks are separated by one blank line
//!
//! # Example
//! ```
//! use ini_core::{encode, EncodeOptions};
//! use serde_json::json;
//!
//! let doc = json!({"name": "web", "ports": [80, 443], "tls": {"enabled": true}});
//! let ini = encode(doc.as_object().unwrap(), EncodeOptions::default());
//! assert_eq!(ini, "name = web\nports[] = 80\nports[] = 443\n\n[tls]\nenabled = true\n");
//! ```

use crate::error::{IniError, Result};
use crate::escape::{safe, safe_str};
use crate::path;
use serde_json::{Map, Value};

const SEPARATOR: &str = " = ";

/// Line terminator written after every emitted line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// The conventional ending of the host platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// Options for [`encode`].
///
/// A bare `&str` or `String` converts into options naming the section, which
/// mirrors passing just a section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Section the document's scalar fields are written under. `None` writes
    /// them at the top of the file, before any header.
    pub section: Option<String>,
    /// Reserved: accepted and passed to child sections, output is unchanged.
    pub whitespace: bool,
    pub line_ending: LineEnding,
}

impl EncodeOptions {
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn whitespace(mut self, whitespace: bool) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

impl From<&str> for EncodeOptions {
    fn from(section: &str) -> Self {
        EncodeOptions::default().section(section)
    }
}

impl From<String> for EncodeOptions {
    fn from(section: String) -> Self {
        EncodeOptions::default().section(section)
    }
}

/// Encode a document into INI text.
pub fn encode(document: &Map<String, Value>, options: impl Into<EncodeOptions>) -> String {
    let options = options.into();
    let mut out = String::new();
    encode_section(document, options.section.as_deref(), &options, &mut out);
    out
}

/// Encode a JSON string into INI text.
///
/// Returns an error if the input is not valid JSON or its top-level value is
/// not an object.
pub fn encode_json(json: &str) -> Result<String> {
    encode_json_with(json, EncodeOptions::default())
}

/// [`encode_json`] with explicit options.
pub fn encode_json_with(json: &str, options: impl Into<EncodeOptions>) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(map) => Ok(encode(&map, options)),
        other => Err(IniError::NotAnObject(type_name(&other))),
    }
}

/// Append one section block, then its child sections, to `out`.
fn encode_section(
    map: &Map<String, Value>,
    section: Option<&str>,
    options: &EncodeOptions,
    out: &mut String,
) {
    let eol = options.line_ending.as_str();
    let mut body = String::new();
    let mut children = Vec::new();

    for (key, value) in map {
        match value {
            Value::Array(items) => {
                let array_key = safe_str(&format!("{key}[]"));
                for item in items {
                    push_line(&mut body, &array_key, &safe(item), eol);
                }
            }
            Value::Object(child) => children.push((key, child)),
            _ => push_line(&mut body, &safe_key(key), &safe(value), eol),
        }
    }

    let start = out.len();
    if let Some(name) = section {
        if !body.is_empty() {
            out.push('[');
            out.push_str(&safe_header(name));
            out.push(']');
            out.push_str(eol);
        }
    }
    out.push_str(&body);

    for (key, child) in children {
        let child_section = match section {
            Some(parent) => format!("{parent}.{}", path::escape_key(key)),
            None => path::escape_key(key),
        };
        let mut child_out = String::new();
        encode_section(child, Some(child_section.as_str()), options, &mut child_out);
        if out.len() > start && !child_out.is_empty() {
            out.push_str(eol);
        }
        out.push_str(&child_out);
    }
}

/// An empty key would leave the line starting with `=`, which reads back as
/// keyless, so it is written as the JSON literal `""`.
fn safe_key(key: &str) -> String {
    if key.is_empty() {
        Value::from(key).to_string()
    } else {
        safe_str(key)
    }
}

/// A `]` inside a header name is only unambiguous when the name is quoted.
fn safe_header(name: &str) -> String {
    if name.contains(']') {
        Value::from(name).to_string()
    } else {
        safe_str(name)
    }
}

fn push_line(out: &mut String, key: &str, value: &str, eol: &str) {
    out.push_str(key);
    out.push_str(SEPARATOR);
    out.push_str(value);
    out.push_str(eol);
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
