//! Value tree → primitive tree.

use serde_json::{Map, Value as JsonValue};

use crate::codec::{Codec, Payload};
use crate::error::EncodeError;
use crate::registry::Registry;
use crate::tag::{TagSyntax, VALUE_KEY};
use crate::value::{CustomValue, Value};

/// Replaces custom values with their tagged primitive form.
pub struct TagEncoder<'r, C: CustomValue> {
    registry: &'r Registry<C>,
}

impl<'r, C: CustomValue> TagEncoder<'r, C> {
    pub fn new(registry: &'r Registry<C>) -> Self {
        Self { registry }
    }

    /// Encodes a value tree into a tree of backend primitives.
    ///
    /// Plain strings starting with the tag prefix are escaped. Object keys
    /// pass through unchanged, except that the wrapper type key is refused.
    pub fn encode(&self, value: &Value<C>) -> Result<JsonValue, EncodeError> {
        self.write_any(value)
    }

    fn syntax(&self) -> &TagSyntax {
        self.registry.syntax()
    }

    fn write_any(&self, value: &Value<C>) -> Result<JsonValue, EncodeError> {
        match value {
            Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Number(n) => Ok(JsonValue::Number(n.clone())),
            Value::Str(s) => Ok(JsonValue::String(self.syntax().escape(s).into_owned())),
            Value::Array(arr) => self.write_arr(arr),
            Value::Object(entries) => self.write_obj(entries),
            Value::Custom(custom) => match self.registry.find_by_value(value)? {
                Some(codec) => self.write_custom(codec, custom),
                None => Err(EncodeError::UnsupportedType {
                    type_name: format!("{:?}", custom.kind()),
                }),
            },
        }
    }

    fn write_arr(&self, arr: &[Value<C>]) -> Result<JsonValue, EncodeError> {
        let mut out = Vec::with_capacity(arr.len());
        for item in arr {
            out.push(self.write_any(item)?);
        }
        Ok(JsonValue::Array(out))
    }

    fn write_obj(&self, entries: &[(String, Value<C>)]) -> Result<JsonValue, EncodeError> {
        let type_key = self.syntax().type_key();
        let mut map = Map::with_capacity(entries.len());
        for (key, val) in entries {
            if key == type_key {
                return Err(EncodeError::ReservedKey { key: key.clone() });
            }
            map.insert(key.clone(), self.write_any(val)?);
        }
        Ok(JsonValue::Object(map))
    }

    fn write_custom(&self, codec: &Codec<C>, custom: &C) -> Result<JsonValue, EncodeError> {
        let payload = codec
            .to_primitive(custom)
            .map_err(|source| EncodeError::CodecFunction {
                codec: codec.name().to_string(),
                value: format!("{custom:?}"),
                source,
            })?;
        match payload {
            Payload::Text(text) => Ok(JsonValue::String(
                self.syntax().format_tag(codec.name(), &text),
            )),
            Payload::Tree(tree) => {
                let inner = self.write_any(&tree)?;
                let mut wrapper = Map::with_capacity(2);
                wrapper.insert(
                    self.syntax().type_key().to_string(),
                    JsonValue::String(codec.name().to_string()),
                );
                wrapper.insert(VALUE_KEY.to_string(), inner);
                Ok(JsonValue::Object(wrapper))
            }
        }
    }
}
