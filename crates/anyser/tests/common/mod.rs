//! Shared fixtures: an application enum with text and structured codecs.

#![allow(dead_code)]

use anyser::{Codec, CodecError, CustomValue, Value};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub const DT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq)]
pub struct MyType {
    pub a: Value<Ext>,
    pub b: Value<Ext>,
    pub c: Value<Ext>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ext {
    Uuid(Uuid),
    Dt(NaiveDateTime),
    My(Box<MyType>),
    /// Fails to encode whenever the inner flag is set.
    Fragile(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtKind {
    Uuid,
    Dt,
    My,
    Fragile,
}

impl CustomValue for Ext {
    type Kind = ExtKind;

    fn kind(&self) -> ExtKind {
        match self {
            Ext::Uuid(_) => ExtKind::Uuid,
            Ext::Dt(_) => ExtKind::Dt,
            Ext::My(_) => ExtKind::My,
            Ext::Fragile(_) => ExtKind::Fragile,
        }
    }
}

fn wrong(value: &Ext) -> CodecError {
    format!("unexpected value {value:?}").into()
}

pub fn uuid_codec() -> Codec<Ext> {
    Codec::text(
        "uuid",
        ExtKind::Uuid,
        |v| match v {
            Ext::Uuid(id) => Ok(id.to_string()),
            other => Err(wrong(other)),
        },
        |s| Ok(Ext::Uuid(Uuid::parse_str(s)?)),
    )
}

pub fn dt_codec() -> Codec<Ext> {
    Codec::text(
        "dt",
        ExtKind::Dt,
        |v| match v {
            Ext::Dt(dt) => Ok(dt.format(DT_FORMAT).to_string()),
            other => Err(wrong(other)),
        },
        |s| Ok(Ext::Dt(NaiveDateTime::parse_from_str(s, DT_FORMAT)?)),
    )
}

pub fn mytype_codec() -> Codec<Ext> {
    Codec::structured(
        "mytype",
        ExtKind::My,
        |v| match v {
            Ext::My(m) => Ok(Value::Array(vec![m.a.clone(), m.b.clone(), m.c.clone()])),
            other => Err(wrong(other)),
        },
        |v| match v {
            Value::Array(items) => {
                let [a, b, c]: [Value<Ext>; 3] = items
                    .try_into()
                    .map_err(|_| "mytype expects three fields")?;
                Ok(Ext::My(Box::new(MyType { a, b, c })))
            }
            other => Err(format!("mytype expects an array, got {other:?}").into()),
        },
    )
}

pub fn fragile_codec() -> Codec<Ext> {
    Codec::text(
        "fragile",
        ExtKind::Fragile,
        |v| match v {
            Ext::Fragile(false) => Ok("ok".to_string()),
            Ext::Fragile(true) => Err("refusing to encode".into()),
            other => Err(wrong(other)),
        },
        |s| match s {
            "ok" => Ok(Ext::Fragile(false)),
            _ => Err("unknown fragile payload".into()),
        },
    )
}

pub fn all_codecs() -> Vec<Codec<Ext>> {
    vec![uuid_codec(), dt_codec(), mytype_codec(), fragile_codec()]
}

pub fn uid() -> Uuid {
    Uuid::parse_str("152e4227-6852-4f8e-912d-bd75478c7eaa").unwrap()
}

pub fn dt() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 2, 3)
        .unwrap()
        .and_hms_micro_opt(1, 23, 45, 12_300)
        .unwrap()
}

pub fn my(a: Value<Ext>, b: Value<Ext>, c: Value<Ext>) -> Value<Ext> {
    Value::Custom(Ext::My(Box::new(MyType { a, b, c })))
}

pub fn custom(ext: Ext) -> Value<Ext> {
    Value::Custom(ext)
}
