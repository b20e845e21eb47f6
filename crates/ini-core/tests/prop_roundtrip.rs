/// Property-Based Roundtrip Tests for the INI codec
///
/// Uses the `proptest` crate to generate random documents and verify that
/// `decode(encode(doc)) == doc` holds for all generated inputs, plus
/// `unsafe_value(safe(s)) == s` for single-line strings.
///
/// Strategies generate:
/// - Random keys (including comment characters, spaces and brackets)
/// - Random strings (including `=`, `;`, `#`, quotes, backslashes, newlines)
/// - Random integers, display-safe floats and booleans
/// - Random flat sections and nested sections (up to 3 levels deep)
/// - Random non-empty arrays of scalars
///
/// Known limitations excluded from testing:
/// - Strings that read as numbers or booleans (decoded with their inferred type)
/// - Keys containing dots or ending in `[]`
/// - Arrays under the empty key (written as `[] = v`, which reads as the key `[]`)
/// - Empty objects and empty arrays (they produce no lines)
/// - `null` (written as the literal `null`, read back as a string)
use ini_core::{decode, encode, safe, unsafe_value, EncodeOptions};
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

/// Generate a key: no dots, never ending in `[]`. May be empty.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
        2 => prop::string::string_regex("[a-zA-Z][a-zA-Z0-9 ;#=\\-\\[\\]]{0,8}[a-zA-Z0-9]").unwrap(),
        1 => Just(String::new()),
    ]
}

/// Generate a `(key, field)` pair the codec can write and read back.
fn arb_entry() -> impl Strategy<Value = (String, Value)> {
    (arb_key(), arb_field()).prop_filter("empty key cannot hold an array", |(k, v)| {
        !(k.is_empty() && v.is_array())
    })
}

/// True when the decoder would give a plain-looking string a different type.
fn reads_as_other_type(s: &str) -> bool {
    let t = s.trim();
    t == "true" || t == "false" || t.parse::<f64>().is_ok() || t.contains('(')
}

/// Generate a string value that must come back as a string.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,20}",
        prop::string::string_regex("[a-zA-Z0-9 ;#=\\[\\]'\"\\\\]{0,20}").unwrap(),
        Just("caf\u{00e9}".to_string()),
        Just("line1\nline2".to_string()),
        Just(" padded ".to_string()),
        Just("\\;".to_string()),
        Just("\"quoted\"".to_string()),
    ]
    .prop_filter("must not read back as number/bool/transform", |s| {
        !reads_as_other_type(s)
    })
}

/// Generate a float that is not a whole number and prints exactly.
fn arb_float() -> impl Strategy<Value = Value> {
    (-10_000_000i64..10_000_000i64, 1u32..5u32).prop_filter_map(
        "must be finite and fractional",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            if !f.is_finite() || f.fract() == 0.0 {
                return None;
            }
            Number::from_f64(f).map(Value::Number)
        },
    )
}

/// Generate a scalar leaf.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => arb_string().prop_map(Value::String),
        2 => any::<i64>().prop_map(|n| Value::Number(n.into())),
        1 => arb_float(),
        1 => any::<bool>().prop_map(Value::Bool),
    ]
}

/// Generate a field value of a section: a scalar or a non-empty scalar array.
fn arb_field() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => arb_scalar(),
        1 => prop::collection::vec(arb_scalar(), 1..4).prop_map(Value::Array),
    ]
}

/// Generate a section with at least one scalar field, so it always emits lines.
fn arb_flat_section() -> impl Strategy<Value = Map<String, Value>> {
    (arb_key(), arb_scalar(), prop::collection::vec(arb_entry(), 0..5)).prop_map(
        |(first_key, first, rest)| {
            let mut map = Map::new();
            map.insert(first_key, first);
            for (k, v) in rest {
                map.insert(k, v);
            }
            map
        },
    )
}

/// Generate a document with nested sections up to 3 levels deep.
fn arb_document() -> impl Strategy<Value = Map<String, Value>> {
    let leaf = arb_flat_section();
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_flat_section(), prop::collection::vec((arb_key(), inner), 0..3)).prop_map(
            |(mut map, children)| {
                for (k, child) in children {
                    map.insert(k, Value::Object(child));
                }
                map
            },
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn roundtrip_documents(doc in arb_document()) {
        let ini = encode(&doc, EncodeOptions::default());
        let decoded = decode(&ini);
        prop_assert_eq!(
            Value::Object(decoded),
            Value::Object(doc),
            "INI was:\n{}",
            ini
        );
    }

    #[test]
    fn roundtrip_under_named_section(section in arb_flat_section()) {
        let ini = encode(&section, "root");
        let decoded = decode(&ini);
        prop_assert_eq!(decoded.get("root"), Some(&Value::Object(section)));
    }

    #[test]
    fn unsafe_inverts_safe(s in arb_string()) {
        let v = Value::String(s);
        prop_assert_eq!(unsafe_value(&safe(&v)), v);
    }

    #[test]
    fn encoded_lines_never_contain_raw_newlines_in_values(doc in arb_document()) {
        let ini = encode(&doc, EncodeOptions::default());
        for line in ini.lines().filter(|l| !l.is_empty()) {
            prop_assert!(line.starts_with('[') || line.contains(" = "), "bad line: {:?}", line);
        }
    }
}
