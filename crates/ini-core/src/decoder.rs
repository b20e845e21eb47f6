//! INI Decoder — converts INI text into a JSON object.
//!
//! The decoder reads the input line by line and never rejects a document for
//! a line it does not understand:
//!
//! - `[name]` switches the insertion target to the section `name`
//! - `key = value` stores a value; a bare `key` stores `true`
//! - `key[] = value` appends to an array
//! - lines starting with `;` or `#`, blank lines, and lines that match neither
//!   shape are skipped
//! - unquoted values are typed: `true`/`false` → bool, integers → i64, other
//!   numbers → f64, everything else stays a string
//! - `name(argument)` values are passed through the [`TransformRegistry`]
//!
//! # Key design decisions
//!
//! - **Section cursor**: the current section is tracked by name and resolved
//!   against the document for each entry, so no borrow of the document is held
//!   across lines.
//! - **Dotted sections are nested after parsing**: `[a.b]` is first stored
//!   under the flat key `a.b`, then moved to `a → b` once every line is read.
//!   This lets `[a.b]` appear before or after `[a]`.
//! - **Quote failures go through one callback**: lenient decoding logs and
//!   keeps the raw text, strict decoding turns the same event into an error.

use crate::error::{IniError, Result};
use crate::escape::{is_quoted, parse_quoted, unescape_plain, RawValue};
use crate::path;
use crate::transform::TransformRegistry;
use serde_json::{Map, Number, Value};
use std::convert::Infallible;

/// Decode INI text leniently with the default transforms.
///
/// Never fails: malformed lines are skipped, and a malformed quoted value is
/// logged and kept as raw text.
pub fn decode(text: &str) -> Map<String, Value> {
    Decoder::new().decode_lenient(text)
}

/// Decode INI text into compact JSON.
pub fn decode_to_json(text: &str) -> Result<String> {
    Ok(serde_json::to_string(&decode(text))?)
}

/// Configurable decoder.
///
/// ```
/// use ini_core::Decoder;
///
/// let strict = Decoder::new().strict(true);
/// assert!(strict.decode(r#"name = "bad"quote""#).is_err());
/// assert!(Decoder::new().decode(r#"name = "bad"quote""#).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    transforms: TransformRegistry,
    strict: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a quoted value that is not a valid JSON literal fails
    /// the whole decode with [`IniError::QuotedValue`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replace the transform registry.
    pub fn transforms(mut self, transforms: TransformRegistry) -> Self {
        self.transforms = transforms;
        self
    }

    /// Register a single transform on top of the current registry.
    pub fn transform<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name, f);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn decode(&self, text: &str) -> Result<Map<String, Value>> {
        if !self.strict {
            return Ok(self.decode_lenient(text));
        }
        self.decode_with(text, |line, _raw, err| {
            Err(IniError::QuotedValue {
                line,
                message: err.to_string(),
            })
        })
    }

    fn decode_lenient(&self, text: &str) -> Map<String, Value> {
        let Ok(document) = self.decode_with(text, |line, raw, err| {
            tracing::warn!(line, value = raw, error = %err, "malformed quoted value, keeping raw text");
            Ok::<_, Infallible>(Value::String(raw.to_string()))
        });
        document
    }

    /// Shared decode loop. `on_malformed` receives the 1-based line number,
    /// the quoted text and the JSON error, and decides between a fallback
    /// value and aborting.
    fn decode_with<E, F>(&self, text: &str, mut on_malformed: F) -> std::result::Result<Map<String, Value>, E>
    where
        F: FnMut(usize, &str, serde_json::Error) -> std::result::Result<Value, E>,
    {
        let mut document = Map::new();
        let mut section: Option<String> = None;

        for (index, physical) in text.split('\n').enumerate() {
            let number = index + 1;
            // A lone `\r` also ends a line.
            for line in physical.split('\r') {
                let line = line.trim();
                if line.is_empty() || line.starts_with([';', '#']) {
                    continue;
                }
                let Some(parsed) = Line::parse(line) else {
                    tracing::trace!(line = number, text = line, "skipping unrecognized line");
                    continue;
                };

                match parsed {
                    Line::Section(raw) => {
                        let name = read_name(raw, number, &mut on_malformed)?;
                        child_object(&mut document, &name);
                        section = Some(name);
                    }
                    Line::Entry { key, value } => {
                        let key = read_name(key, number, &mut on_malformed)?;
                        let value = match value {
                            Some(raw) => self.read_value(raw, number, &mut on_malformed)?,
                            None => Value::Bool(true),
                        };
                        let target = match &section {
                            Some(name) => child_object(&mut document, name),
                            None => &mut document,
                        };
                        store(target, key, value);
                    }
                }
            }
        }

        Ok(nest_dotted_sections(document))
    }

    fn read_value<E, F>(&self, raw: &str, line: usize, on_malformed: &mut F) -> std::result::Result<Value, E>
    where
        F: FnMut(usize, &str, serde_json::Error) -> std::result::Result<Value, E>,
    {
        match RawValue::classify(raw) {
            RawValue::Quoted(json) => parse_quoted(json).or_else(|err| on_malformed(line, json, err)),
            RawValue::Plain(text) => {
                let text = unescape_plain(text);
                Ok(self
                    .transforms
                    .apply(&text)
                    .unwrap_or_else(|| coerce(text)))
            }
        }
    }
}

/// One classified input line. Both branches borrow from the trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Section(&'a str),
    Entry { key: &'a str, value: Option<&'a str> },
}

impl<'a> Line<'a> {
    /// Match a trimmed, non-comment line. Returns `None` for lines with an
    /// empty key (`= value`).
    fn parse(line: &'a str) -> Option<Self> {
        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            // a JSON-quoted name may contain brackets of its own
            if !name.contains(']') || is_quoted(name) {
                return Some(Line::Section(name));
            }
        }

        match find_separator(line) {
            Some(0) => None,
            Some(eq) => Some(Line::Entry {
                key: &line[..eq],
                value: Some(&line[eq + 1..]),
            }),
            None => Some(Line::Entry {
                key: line,
                value: None,
            }),
        }
    }
}

/// Position of the `=` that ends the key. A JSON-quoted key may itself contain
/// `=`, so the search starts after its closing quote.
fn find_separator(line: &str) -> Option<usize> {
    let from = if line.starts_with('"') {
        find_closing_quote(line, 1).map_or(0, |end| end + 1)
    } else {
        0
    };
    line[from..].find('=').map(|pos| pos + from)
}

/// Find the position of the closing quote, handling escape sequences.
fn find_closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Unescape a key or section name. Names are never type-coerced; a quoted
/// name that decodes to a non-string is used in its JSON form.
fn read_name<E, F>(raw: &str, line: usize, on_malformed: &mut F) -> std::result::Result<String, E>
where
    F: FnMut(usize, &str, serde_json::Error) -> std::result::Result<Value, E>,
{
    let value = match RawValue::classify(raw) {
        RawValue::Quoted(json) => parse_quoted(json).or_else(|err| on_malformed(line, json, err))?,
        RawValue::Plain(text) => return Ok(unescape_plain(text)),
    };
    Ok(match value {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Type an unquoted value.
fn coerce(text: String) -> Value {
    match text.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    // `f64::from_str` also accepts "inf" and "NaN"; `from_f64` rejects both.
    if let Some(n) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(text)
}

/// Write a decoded entry. A `key[]` entry appends, wrapping an earlier scalar
/// written under the same key.
fn store(target: &mut Map<String, Value>, key: String, value: Value) {
    let array_name = key.strip_suffix("[]").filter(|name| !name.is_empty());
    let Some(name) = array_name else {
        target.insert(key, value);
        return;
    };

    let slot = target
        .entry(name)
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        let previous = slot.take();
        *slot = Value::Array(vec![previous]);
    }
    if let Value::Array(items) = slot {
        items.push(value);
    }
}

/// Get the object stored under `key`, creating it, or replacing a non-object
/// value, as needed.
fn child_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(child) => child,
        _ => unreachable!("slot was just set to an object"),
    }
}

/// Move sections with dotted names into nested objects:
/// `{"a": {"y": 1}, "a.b": {"x": 2}}` → `{"a": {"y": 1, "b": {"x": 2}}}`.
///
/// A name made of one segment with no escaped dots stays where it is.
fn nest_dotted_sections(document: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    let mut dotted = Vec::new();

    for (key, value) in document {
        if value.is_object() {
            let segments = path::segments(&key);
            if segments.len() != 1 || segments[0] != key {
                dotted.push((segments, value));
                continue;
            }
        }
        out.insert(key, value);
    }

    for (segments, value) in dotted {
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };
        let mut target = &mut out;
        for part in parents {
            target = child_object(target, part);
        }
        match target.get_mut(last.as_str()) {
            Some(Value::Object(existing)) if value.is_object() => {
                if let Value::Object(incoming) = value {
                    existing.extend(incoming);
                }
            }
            _ => {
                target.insert(last.clone(), value);
            }
        }
    }
    out
}
