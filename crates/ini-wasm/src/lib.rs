//! WASM bindings for ini-core.
//!
//! Exposes `encode`, `decode`, `safe` and `unsafe` as `#[wasm_bindgen]`
//! functions callable from JavaScript/TypeScript. Documents and values cross
//! the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p ini-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/ini_wasm.wasm
//! ```

use serde_json::Value;
use wasm_bindgen::prelude::*;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Encode a JSON object string into INI text.
///
/// When `section` is given, top-level scalar fields are written under it.
/// Throws a JS error if the input is not valid JSON or not an object.
#[wasm_bindgen]
pub fn encode(json: &str, section: Option<String>) -> std::result::Result<String, JsValue> {
    let options = match section {
        Some(section) => ini_core::EncodeOptions::from(section),
        None => ini_core::EncodeOptions::default(),
    };
    ini_core::encode_json_with(json, options).map_err(to_js)
}

/// Decode INI text into a compact JSON string.
///
/// Lenient unless `strict` is set, in which case a malformed quoted value
/// throws a JS error naming its line.
#[wasm_bindgen]
pub fn decode(ini: &str, strict: Option<bool>) -> std::result::Result<String, JsValue> {
    let document = ini_core::Decoder::new()
        .strict(strict.unwrap_or(false))
        .decode(ini)
        .map_err(to_js)?;
    serde_json::to_string(&Value::Object(document)).map_err(to_js)
}

/// Escape a JSON scalar (given as JSON text) for use as an INI key or value.
#[wasm_bindgen]
pub fn safe(json: &str) -> std::result::Result<String, JsValue> {
    let value: Value = serde_json::from_str(json).map_err(to_js)?;
    Ok(ini_core::safe(&value))
}

/// Reverse [`safe`]: read INI value text and return it as JSON text.
#[wasm_bindgen(js_name = "unsafe")]
pub fn unsafe_value(text: &str) -> String {
    ini_core::unsafe_value(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_returns_compact_json() {
        let json = decode("[a]\nx = 1", None).unwrap();
        assert_eq!(json, r#"{"a":{"x":1}}"#);
    }

    #[test]
    fn encode_without_section() {
        assert_eq!(encode(r#"{"k":"v"}"#, None).unwrap(), "k = v\n");
    }

    #[test]
    fn encode_with_section() {
        let ini = encode(r#"{"k":"v"}"#, Some("main".to_string())).unwrap();
        assert_eq!(ini, "[main]\nk = v\n");
    }

    #[test]
    fn unsafe_returns_json_text() {
        assert_eq!(unsafe_value(r#""quoted""#), r#""quoted""#);
        assert_eq!(unsafe_value(r"a\;b"), r#""a;b""#);
    }

    #[test]
    fn safe_escapes_comment_chars() {
        assert_eq!(safe(r#""a;b""#).unwrap(), r"a\;b");
    }
}
