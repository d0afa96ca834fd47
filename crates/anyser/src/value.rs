//! [`Value`] — the value tree handed to a [`Serializer`](crate::Serializer).
//!
//! A value tree is a primitive tree (null, booleans, numbers, strings, arrays,
//! ordered objects) in which [`Value::Custom`] nodes may appear at any depth.
//! Custom nodes carry an application-defined type implementing
//! [`CustomValue`].

use std::fmt;
use std::hash::Hash;

use serde_json::Number;

/// An application-defined type that codecs convert to and from primitives.
///
/// Implement this on a closed enum listing every custom type the application
/// wants to serialize. [`CustomValue::kind`] is the type identifier that the
/// [`Registry`](crate::Registry) resolves codecs by.
///
/// ```
/// use anyser::CustomValue;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Money {
///     Cents(i64),
///     Ratio(i64, i64),
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MoneyKind {
///     Cents,
///     Ratio,
/// }
///
/// impl CustomValue for Money {
///     type Kind = MoneyKind;
///
///     fn kind(&self) -> MoneyKind {
///         match self {
///             Money::Cents(_) => MoneyKind::Cents,
///             Money::Ratio(..) => MoneyKind::Ratio,
///         }
///     }
/// }
/// ```
pub trait CustomValue: fmt::Debug {
    /// Type identifier used as the registry lookup key.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// Returns the type identifier of this value.
    fn kind(&self) -> Self::Kind;
}

/// A value tree: primitives plus custom values nested anywhere.
///
/// Objects keep their entries in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<C> {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    Array(Vec<Value<C>>),
    /// Ordered key-value pairs.
    Object(Vec<(String, Value<C>)>),
    /// An application-defined value, converted by a registered codec.
    Custom(C),
}

impl<C> Value<C> {
    /// Builds an object from key-value pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value<C>)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns `true` unless this node is [`Value::Custom`].
    ///
    /// Only the node itself is inspected, not its children.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Custom(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&C> {
        match self {
            Value::Custom(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<C>]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Looks up an object entry by key (first match).
    pub fn get(&self, key: &str) -> Option<&Value<C>> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short description of the node's shape, used in error messages.
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Custom(_) => "custom",
        }
    }
}

impl<C> From<serde_json::Value> for Value<C> {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<C> From<bool> for Value<C> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<C> From<i64> for Value<C> {
    fn from(i: i64) -> Self {
        Value::Number(i.into())
    }
}

impl<C> From<i32> for Value<C> {
    fn from(i: i32) -> Self {
        Value::Number(i.into())
    }
}

impl<C> From<u64> for Value<C> {
    fn from(u: u64) -> Self {
        Value::Number(u.into())
    }
}

/// Non-finite floats become [`Value::Null`], as with `serde_json::json!`.
impl<C> From<f64> for Value<C> {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl<C> From<&str> for Value<C> {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<C> From<String> for Value<C> {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<C> From<Vec<Value<C>>> for Value<C> {
    fn from(arr: Vec<Value<C>>) -> Self {
        Value::Array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type V = Value<std::convert::Infallible>;

    #[test]
    fn from_json_keeps_object_order() {
        let v = V::from(json!({"z": 1, "a": [true, null], "m": "x"}));
        let keys: Vec<&str> = match &v {
            Value::Object(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => panic!("expected object"),
        };
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(v.get("m").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(V::from(f64::NAN), Value::Null);
        assert_eq!(V::from(f64::INFINITY), Value::Null);
        assert_eq!(V::from(1.5), Value::Number(Number::from_f64(1.5).unwrap()));
    }

    #[test]
    fn object_helper_and_accessors() {
        let v = V::object([("a", V::from(1)), ("b", V::from("two"))]);
        assert_eq!(v.get("a"), Some(&V::from(1i64)));
        assert_eq!(v.get("missing"), None);
        assert!(v.is_primitive());
        assert_eq!(v.shape(), "object");
    }
}
