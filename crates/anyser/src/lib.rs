//! Round-trip custom types through primitive-only serializers.
//!
//! A primitive backend (JSON, CBOR, ...) only understands null, booleans,
//! numbers, strings, arrays, and string-keyed objects. This crate lets such a
//! backend carry application types as well, without touching the backend:
//! custom values become tagged strings before encoding and are restored from
//! them after decoding.
//!
//! ```text
//! serialize:   Value ─ TagEncoder ─▶ primitive tree ─ Backend::encode ─▶ output
//! deserialize: output ─ Backend::decode ─▶ primitive tree ─ TagDecoder ─▶ Value
//! ```
//!
//! A tagged string has the form `PREFIX NAME DELIMITER PAYLOAD`, by default
//! `$uuid:f06ffa42-d5fb-4f65-b9a7-94d3b92d5c85`. Plain strings that begin
//! with the prefix are escaped by doubling it. See [`tag`] for the grammar.
//!
//! # Example
//!
//! ```
//! use anyser::{Codec, CustomValue, JsonBackend, Serializer, Value};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Celsius(i32);
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! struct CelsiusKind;
//!
//! impl CustomValue for Celsius {
//!     type Kind = CelsiusKind;
//!     fn kind(&self) -> CelsiusKind {
//!         CelsiusKind
//!     }
//! }
//!
//! let codec = Codec::text(
//!     "c",
//!     CelsiusKind,
//!     |t: &Celsius| Ok(t.0.to_string()),
//!     |s: &str| Ok(Celsius(s.parse()?)),
//! );
//! let ser = Serializer::new([codec], JsonBackend::new()).unwrap();
//!
//! let value = Value::Array(vec![
//!     Value::from(1),
//!     Value::Custom(Celsius(-4)),
//!     Value::from("$5"),
//! ]);
//! let text = ser.serialize(&value).unwrap();
//! assert_eq!(text, r#"[1,"$c:-4","$$5"]"#);
//! assert_eq!(ser.deserialize(&text).unwrap(), value);
//! ```

pub mod backend;
pub mod builtin;
pub mod codec;
pub mod error;
pub mod options;
pub mod registry;
pub mod serializer;
pub mod tag;
pub mod tagging;
pub mod value;

pub use backend::{Backend, CborBackend, CborBackendError, JsonBackend};
pub use codec::{Codec, Payload};
pub use error::{CodecError, DecodeError, EncodeError, RegistryError, SerializerError};
pub use options::SerializerOptions;
pub use registry::Registry;
pub use serializer::Serializer;
pub use tag::{ParsedString, TagSyntax};
pub use tagging::{TagDecoder, TagEncoder};
pub use value::{CustomValue, Value};
