use ini_core::{decode, encode, EncodeOptions, LineEnding};
use serde_json::{json, Value};

/// Assert that encode → decode roundtrips to the same document.
fn assert_roundtrip(value: Value) {
    let map = value.as_object().expect("roundtrip input must be an object");
    let ini = encode(map, EncodeOptions::default());
    let decoded = Value::Object(decode(&ini));
    assert_eq!(
        value, decoded,
        "Roundtrip failed:\n  input:  {value}\n  INI:\n{ini}\n  output: {decoded}"
    );
}

// ============================================================================
// Flat documents
// ============================================================================

#[test]
fn roundtrip_empty() {
    assert_roundtrip(json!({}));
}

#[test]
fn roundtrip_scalars() {
    assert_roundtrip(json!({
        "name": "Alice",
        "age": 30,
        "height": 1.68,
        "admin": false,
        "negative": -12
    }));
}

#[test]
fn roundtrip_strings_needing_quotes() {
    assert_roundtrip(json!({
        "expr": "a=b",
        "padded": "  spaced  ",
        "multi": "line1\nline2",
        "bracket": "[x]",
        "quoted": "\"already\""
    }));
}

#[test]
fn roundtrip_strings_with_comment_chars() {
    assert_roundtrip(json!({
        "motd": "Welcome; have fun #1",
        "path": "C:\\games\\server",
        "tricky": "end\\;"
    }));
}

#[test]
fn roundtrip_unicode() {
    assert_roundtrip(json!({"greeting": "caf\u{00e9} \u{4f60}\u{597d}"}));
}

#[test]
fn roundtrip_empty_string() {
    assert_roundtrip(json!({"blank": ""}));
}

#[test]
fn roundtrip_empty_key() {
    assert_roundtrip(json!({"": 1, "k": "v"}));
}

#[test]
fn roundtrip_empty_key_in_section() {
    assert_roundtrip(json!({"s": {"": "blank", "x": 2}}));
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn roundtrip_string_array() {
    assert_roundtrip(json!({"tags": ["red", "green", "blue"]}));
}

#[test]
fn roundtrip_single_element_array() {
    assert_roundtrip(json!({"tags": ["only"]}));
}

#[test]
fn roundtrip_mixed_scalar_array() {
    assert_roundtrip(json!({"mix": [1, 2.5, "three", true]}));
}

// ============================================================================
// Sections
// ============================================================================

#[test]
fn roundtrip_one_section() {
    assert_roundtrip(json!({"server": {"host": "localhost", "port": 443}}));
}

#[test]
fn roundtrip_top_level_and_sections() {
    assert_roundtrip(json!({
        "name": "game",
        "server": {"port": 443, "tags": ["eu", "west"]},
        "limits": {"players": 64}
    }));
}

#[test]
fn roundtrip_deep_nesting() {
    assert_roundtrip(json!({
        "a": {"y": 1, "b": {"x": 2, "c": {"w": 3}}}
    }));
}

#[test]
fn roundtrip_intermediate_without_own_fields() {
    assert_roundtrip(json!({"a": {"b": {"c": {"d": 1}}}}));
}

#[test]
fn roundtrip_dotted_key_at_top_level() {
    assert_roundtrip(json!({"www.example.com": {"root": "/srv"}}));
}

#[test]
fn roundtrip_dotted_key_nested() {
    assert_roundtrip(json!({"hosts": {"www.example.com": {"root": "/srv"}}}));
}

#[test]
fn roundtrip_section_name_with_closing_bracket() {
    assert_roundtrip(json!({"a]b": {"x": 1}}));
}

#[test]
fn roundtrip_nested_section_under_bracketed_name() {
    assert_roundtrip(json!({"a]b": {"y": 2, "c]": {"x": 1}}}));
}

#[test]
fn roundtrip_crlf() {
    let value = json!({"a": 1, "list": ["x"], "s": {"b": "two"}});
    let ini = encode(
        value.as_object().unwrap(),
        EncodeOptions::default().line_ending(LineEnding::CrLf),
    );
    assert_eq!(Value::Object(decode(&ini)), value);
}

// ============================================================================
// Decode → encode
// ============================================================================

#[test]
fn reencode_normalizes_hand_written_file() {
    let text = "\
; game server
name=game   ; trailing comment
[server]
port=443
motd = \"hello = world\"
[server.limits]
players = 64
";
    let ini = encode(&decode(text), EncodeOptions::default());
    assert_eq!(
        ini,
        "name = game\n\n[server]\nport = 443\nmotd = \"hello = world\"\n\n[server.limits]\nplayers = 64\n"
    );
}

#[test]
fn reencode_is_stable() {
    let text = "a = 1\ntags[] = x\ntags[] = y\n\n[s]\nk = v\n\n[s.t]\nz = true\n";
    let once = encode(&decode(text), EncodeOptions::default());
    assert_eq!(once, text);
    let twice = encode(&decode(&once), EncodeOptions::default());
    assert_eq!(once, twice);
}
