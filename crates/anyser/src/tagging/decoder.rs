//! Primitive tree → value tree.

use serde_json::{Map, Value as JsonValue};

use crate::codec::{Codec, Payload};
use crate::error::DecodeError;
use crate::registry::Registry;
use crate::tag::{malformed, ParsedString, TagSyntax, VALUE_KEY};
use crate::value::{CustomValue, Value};

/// Restores custom values from tagged strings and wrapper objects.
pub struct TagDecoder<'r, C: CustomValue> {
    registry: &'r Registry<C>,
}

impl<'r, C: CustomValue> TagDecoder<'r, C> {
    pub fn new(registry: &'r Registry<C>) -> Self {
        Self { registry }
    }

    /// Decodes a primitive tree produced by a backend.
    ///
    /// # Errors
    ///
    /// - `DecodeError::UnknownTag` for a well-formed tag naming no codec
    /// - `DecodeError::MalformedTag` for a prefixed string that is neither
    ///   escaped nor a valid tag, or a broken wrapper object
    /// - `DecodeError::CodecFunction` when a codec rejects its payload
    pub fn decode(&self, value: JsonValue) -> Result<Value<C>, DecodeError> {
        self.read_any(value)
    }

    fn syntax(&self) -> &TagSyntax {
        self.registry.syntax()
    }

    fn read_any(&self, value: JsonValue) -> Result<Value<C>, DecodeError> {
        match value {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            JsonValue::Number(n) => Ok(Value::Number(n)),
            JsonValue::String(s) => self.read_str(s),
            JsonValue::Array(arr) => {
                let mut out = Vec::with_capacity(arr.len());
                for item in arr {
                    out.push(self.read_any(item)?);
                }
                Ok(Value::Array(out))
            }
            JsonValue::Object(map) => self.read_obj(map),
        }
    }

    fn read_str(&self, s: String) -> Result<Value<C>, DecodeError> {
        if !s.starts_with(self.syntax().prefix()) {
            return Ok(Value::Str(s));
        }
        match self.syntax().parse(&s)? {
            ParsedString::Plain(plain) => Ok(Value::Str(plain.to_string())),
            ParsedString::Escaped(raw) => Ok(Value::Str(raw.to_string())),
            ParsedString::Tagged { name, payload } => {
                let codec = self.codec(name)?;
                codec
                    .from_primitive(Payload::Text(payload.to_string()))
                    .map(Value::Custom)
                    .map_err(|source| DecodeError::CodecFunction {
                        codec: name.to_string(),
                        value: s.clone(),
                        source,
                    })
            }
        }
    }

    fn read_obj(&self, map: Map<String, JsonValue>) -> Result<Value<C>, DecodeError> {
        if map.contains_key(self.syntax().type_key()) {
            return self.read_wrapper(map);
        }
        let mut entries = Vec::with_capacity(map.len());
        for (key, val) in map {
            entries.push((key, self.read_any(val)?));
        }
        Ok(Value::Object(entries))
    }

    fn read_wrapper(&self, mut map: Map<String, JsonValue>) -> Result<Value<C>, DecodeError> {
        let type_key = self.syntax().type_key();
        if map.len() != 2 || !map.contains_key(VALUE_KEY) {
            return Err(malformed(
                &JsonValue::Object(map).to_string(),
                "wrapper must hold exactly the type and value keys",
            ));
        }
        let name = match map.get(type_key) {
            Some(JsonValue::String(name)) => name.clone(),
            _ => {
                return Err(malformed(
                    &JsonValue::Object(map).to_string(),
                    "wrapper type must be a string",
                ))
            }
        };
        let codec = self.codec(&name)?;
        let inner = map.remove(VALUE_KEY).unwrap_or(JsonValue::Null);
        let raw = inner.to_string();
        // Text codecs take the wrapped string verbatim; only structured
        // payloads are restored recursively.
        let payload = match inner {
            JsonValue::String(s) if !codec.is_structured() => Payload::Text(s),
            other if !codec.is_structured() => Payload::Tree(Value::from(other)),
            other => Payload::Tree(self.read_any(other)?),
        };
        codec
            .from_primitive(payload)
            .map(Value::Custom)
            .map_err(|source| DecodeError::CodecFunction {
                codec: name,
                value: raw,
                source,
            })
    }

    fn codec(&self, name: &str) -> Result<&'r Codec<C>, DecodeError> {
        self.registry
            .find_by_name(name)
            .ok_or_else(|| DecodeError::UnknownTag {
                name: name.to_string(),
            })
    }
}
