//! Error types for INI encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur during INI encoding or decoding.
///
/// Plain `decode` never produces these; malformed lines are skipped and a bad
/// quoted literal only logs. Errors surface from strict decoding and from the
/// JSON string-level helpers.
#[derive(Error, Debug)]
pub enum IniError {
    /// The input string was not valid JSON (string-level encode path).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON handed to the encoder was not an object.
    #[error("Encoding error: top-level value must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A quoted value could not be read as a JSON literal (strict mode only).
    /// `line` is 1-based; 0 means the value was unescaped outside a document.
    #[error("INI parse error at line {line}: {message}")]
    QuotedValue { line: usize, message: String },
}

/// Convenience alias used throughout ini-core.
pub type Result<T> = std::result::Result<T, IniError>;
