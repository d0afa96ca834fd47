//! Error types for registry construction, tagging, and serialization.

use thiserror::Error;

/// Error returned by a codec's own conversion functions.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?`, as do
/// `String` and `&str` messages.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Errors detected while configuring a registry. A serializer cannot be
/// built while any of these stand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid tag options: {0}")]
    InvalidOptions(String),
    #[error("invalid codec name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("codec name {0:?} is already registered")]
    DuplicateName(String),
    #[error("codec {incoming:?} claims type {kind}, already handled by codec {existing:?}")]
    AmbiguousType {
        kind: String,
        existing: String,
        incoming: String,
    },
}

/// Errors raised while turning a value tree into a primitive tree.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("no codec registered for type {type_name}")]
    UnsupportedType { type_name: String },
    #[error("object key {key:?} is reserved for tagged wrappers")]
    ReservedKey { key: String },
    #[error("codec {codec:?} failed to encode {value}: {source}")]
    CodecFunction {
        codec: String,
        value: String,
        #[source]
        source: CodecError,
    },
}

/// Errors raised while turning a decoded primitive tree back into a value
/// tree.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown tag {name:?}")]
    UnknownTag { name: String },
    #[error("malformed tag in {input:?}: {reason}")]
    MalformedTag { input: String, reason: &'static str },
    #[error("codec {codec:?} failed to decode {value}: {source}")]
    CodecFunction {
        codec: String,
        value: String,
        #[source]
        source: CodecError,
    },
}

/// Errors returned by [`Serializer::serialize`](crate::Serializer::serialize)
/// and [`Serializer::deserialize`](crate::Serializer::deserialize).
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
