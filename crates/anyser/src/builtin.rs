//! Ready-made codecs for UUIDs and timestamps.
//!
//! ```
//! use anyser::builtin::builtin_codecs;
//! use anyser::{JsonBackend, Serializer, Value};
//! use uuid::Uuid;
//!
//! let ser = Serializer::new(builtin_codecs(), JsonBackend::new()).unwrap();
//! let id = Uuid::parse_str("f06ffa42-d5fb-4f65-b9a7-94d3b92d5c85").unwrap();
//! let value = Value::object([("id", Value::from(id))]);
//!
//! let text = ser.serialize(&value).unwrap();
//! assert_eq!(text, r#"{"id":"$uuid:f06ffa42-d5fb-4f65-b9a7-94d3b92d5c85"}"#);
//! assert_eq!(ser.deserialize(&text).unwrap(), value);
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use uuid::Uuid;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::value::{CustomValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Builtin {
    Uuid(Uuid),
    /// Timestamp with its original UTC offset.
    DateTime(DateTime<FixedOffset>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Uuid,
    DateTime,
}

impl CustomValue for Builtin {
    type Kind = BuiltinKind;

    fn kind(&self) -> BuiltinKind {
        match self {
            Builtin::Uuid(_) => BuiltinKind::Uuid,
            Builtin::DateTime(_) => BuiltinKind::DateTime,
        }
    }
}

/// `$uuid:<hyphenated lowercase>`.
pub fn uuid_codec() -> Codec<Builtin> {
    Codec::text(
        "uuid",
        BuiltinKind::Uuid,
        |value| match value {
            Builtin::Uuid(id) => Ok(id.hyphenated().to_string()),
            other => Err(mismatch("uuid", other)),
        },
        |payload| Ok(Builtin::Uuid(Uuid::parse_str(payload)?)),
    )
}

/// `$dt:<RFC 3339>`; fractional seconds are written only when present.
pub fn datetime_codec() -> Codec<Builtin> {
    Codec::text(
        "dt",
        BuiltinKind::DateTime,
        |value| match value {
            Builtin::DateTime(dt) => Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            other => Err(mismatch("dt", other)),
        },
        |payload| Ok(Builtin::DateTime(DateTime::parse_from_rfc3339(payload)?)),
    )
}

pub fn builtin_codecs() -> Vec<Codec<Builtin>> {
    vec![uuid_codec(), datetime_codec()]
}

fn mismatch(codec: &str, value: &Builtin) -> CodecError {
    format!("codec {codec:?} cannot encode {value:?}").into()
}

impl From<Uuid> for Value<Builtin> {
    fn from(id: Uuid) -> Self {
        Value::Custom(Builtin::Uuid(id))
    }
}

impl From<DateTime<FixedOffset>> for Value<Builtin> {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::Custom(Builtin::DateTime(dt))
    }
}

impl From<DateTime<Utc>> for Value<Builtin> {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Custom(Builtin::DateTime(dt.fixed_offset()))
    }
}
