//! # ini-python
//!
//! Python bindings for the INI encoder/decoder, built with PyO3.
//!
//! Exposes the following functions to Python as the `ini_format` module:
//!
//! - `encode(json, section=None)` -- JSON object string -> INI string
//! - `decode(ini, strict=False)` -- INI string -> JSON string
//! - `safe(json)` -- JSON scalar string -> escaped INI text
//! - `unsafe(text)` -- INI value text -> JSON string

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Encode a JSON object string into INI text.
///
/// Args:
///     json: A JSON string whose top-level value is an object.
///     section: Optional section to write top-level fields under.
///
/// Returns:
///     The INI-encoded string.
///
/// Raises:
///     ValueError: If the input is not valid JSON or not an object.
#[pyfunction]
#[pyo3(signature = (json, section=None))]
fn encode(json: &str, section: Option<&str>) -> PyResult<String> {
    let options = match section {
        Some(section) => ini_core::EncodeOptions::from(section),
        None => ini_core::EncodeOptions::default(),
    };
    ini_core::encode_json_with(json, options).map_err(value_error)
}

/// Decode INI text into a JSON string.
///
/// Args:
///     ini: INI text.
///     strict: Raise on malformed quoted values instead of keeping raw text.
///
/// Returns:
///     The compact JSON string.
///
/// Raises:
///     ValueError: In strict mode, if a quoted value is malformed.
#[pyfunction]
#[pyo3(signature = (ini, strict=false))]
fn decode(ini: &str, strict: bool) -> PyResult<String> {
    let document = ini_core::Decoder::new()
        .strict(strict)
        .decode(ini)
        .map_err(value_error)?;
    serde_json::to_string(&Value::Object(document)).map_err(value_error)
}

/// Escape a JSON scalar for use as an INI key or value.
///
/// Raises:
///     ValueError: If the input is not valid JSON.
#[pyfunction]
fn safe(json: &str) -> PyResult<String> {
    let value: Value = serde_json::from_str(json).map_err(value_error)?;
    Ok(ini_core::safe(&value))
}

/// Read INI value text back into a value, returned as a JSON string.
#[pyfunction]
#[pyo3(name = "unsafe")]
fn unsafe_value(text: &str) -> String {
    ini_core::unsafe_value(text).to_string()
}

/// The `ini_format` Python module, implemented in Rust via PyO3.
#[pymodule]
fn ini_format(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(safe, m)?)?;
    m.add_function(wrap_pyfunction!(unsafe_value, m)?)?;
    Ok(())
}
