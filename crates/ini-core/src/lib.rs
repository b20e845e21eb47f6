//! # ini-core
//!
//! Pure-Rust encoder and decoder for an extended **INI** dialect: sections,
//! `key = value` pairs, `key[]` arrays, dotted nested sections and
//! JSON-literal quoting for values that would not survive on a plain line.
//!
//! Documents are `serde_json::Map`s, so a decoded file can be handed straight
//! to anything that speaks JSON, and any JSON object can be written out as INI.
//!
//! ## Quick start
//!
//! ```rust
//! use ini_core::{decode, encode, EncodeOptions};
//! use serde_json::json;
//!
//! let text = "\
//! name = game
//! [server]
//! port = 443
//! [server.limits]
//! players = 64
//! ";
//! let doc = decode(text);
//! assert_eq!(
//!     serde_json::Value::Object(doc.clone()),
//!     json!({"name": "game", "server": {"port": 443, "limits": {"players": 64}}})
//! );
//!
//! // INI → document → INI
//! let back = encode(&doc, EncodeOptions::default());
//! assert_eq!(back, "name = game\n\n[server]\nport = 443\n\n[server.limits]\nplayers = 64\n");
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — document → INI text
//! - [`decoder`] — INI text → document, strict or lenient
//! - [`escape`] — `safe` / `unsafe_value`, the single-line escaping rules
//! - [`path`] — splitting and joining dotted section names
//! - [`transform`] — `name(argument)` value transforms applied on decode
//! - [`lag`] — standalone tick-time classifier
//! - [`error`] — Error types for strict decoding and the JSON helpers

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod lag;
pub mod path;
pub mod transform;

pub use decoder::{decode, decode_to_json, Decoder};
pub use encoder::{encode, encode_json, encode_json_with, EncodeOptions, LineEnding};
pub use error::{IniError, Result};
pub use escape::{safe, try_unsafe_value, unsafe_value};
pub use transform::TransformRegistry;
