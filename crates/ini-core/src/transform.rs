//! Named value transforms applied while decoding.
//!
//! An unquoted value written as a call, `name(argument)`, is handed to the
//! transform registered under `name`. The transform's result replaces the
//! literal text. Unknown names, and transforms that decline the argument by
//! returning `None`, leave the value as plain text.
//!
//! ```
//! use ini_core::{Decoder, TransformRegistry};
//! use serde_json::json;
//!
//! let decoder = Decoder::new().transforms(
//!     TransformRegistry::empty().with("double", |arg| {
//!         arg.parse::<i64>().ok().map(|n| json!(n * 2))
//!     }),
//! );
//! let doc = decoder.decode("size = double(21)").unwrap();
//! assert_eq!(doc["size"], json!(42));
//! ```

use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a value transform: trimmed argument text in, value out.
pub type TransformFn = dyn Fn(&str) -> Option<Value> + Send + Sync;

/// Name under which [`mass_to_size`] is registered by default.
pub const MASS_TO_SIZE: &str = "massToSize";

/// Transforms keyed by name.
///
/// `Default` registers the built-in [`MASS_TO_SIZE`] transform;
/// [`TransformRegistry::empty`] starts with none.
#[derive(Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<TransformFn>>,
}

impl TransformRegistry {
    pub fn empty() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    /// Register `f` under `name`, replacing any previous transform.
    pub fn insert<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name.into(), Arc::new(f));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.insert(name, f);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.transforms.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply the matching transform if `raw` has the form `name(argument)`.
    ///
    /// Returns `None` when the text is not a call, the name is not registered,
    /// or the transform rejects the argument.
    pub fn apply(&self, raw: &str) -> Option<Value> {
        let (name, argument) = parse_call(raw)?;
        let transform = self.transforms.get(name)?;
        let value = transform(argument);
        if value.is_none() {
            tracing::debug!(transform = name, argument, "transform declined argument");
        }
        value
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::empty().with(MASS_TO_SIZE, mass_to_size)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TransformRegistry")
            .field("transforms", &names)
            .finish()
    }
}

/// Map a mass to a radius-like size: `sqrt(mass * 100) + 0.5`.
///
/// Declines arguments that are not numbers and results that are not finite
/// (negative mass).
pub fn mass_to_size(argument: &str) -> Option<Value> {
    let mass: f64 = argument.parse().ok()?;
    let size = (mass * 100.0).sqrt() + 0.5;
    Number::from_f64(size).map(Value::Number)
}

/// Split `name(argument)` into its parts. `name` must be an identifier and the
/// text must end with the closing parenthesis.
fn parse_call(raw: &str) -> Option<(&str, &str)> {
    let open = raw.find('(')?;
    let name = &raw[..open];
    let argument = raw[open + 1..].strip_suffix(')')?;
    is_identifier(name).then(|| (name, argument.trim()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
