//! [`Codec`] — a named pair of conversions between one custom type and its
//! primitive form.

use std::fmt;
use std::sync::Arc;

use crate::error::CodecError;
use crate::value::{CustomValue, Value};

type TextTo<C> = Arc<dyn Fn(&C) -> Result<String, CodecError> + Send + Sync>;
type TextFrom<C> = Arc<dyn Fn(&str) -> Result<C, CodecError> + Send + Sync>;
type TreeTo<C> = Arc<dyn Fn(&C) -> Result<Value<C>, CodecError> + Send + Sync>;
type TreeFrom<C> = Arc<dyn Fn(Value<C>) -> Result<C, CodecError> + Send + Sync>;

/// Primitive form produced by [`Codec::to_primitive`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<C> {
    /// Written as a tagged string.
    Text(String),
    /// Written as a wrapper object. May hold further custom values.
    Tree(Value<C>),
}

enum Conversion<C> {
    Text { to: TextTo<C>, from: TextFrom<C> },
    Structured { to: TreeTo<C>, from: TreeFrom<C> },
}

impl<C> Clone for Conversion<C> {
    fn clone(&self) -> Self {
        match self {
            Conversion::Text { to, from } => Conversion::Text {
                to: Arc::clone(to),
                from: Arc::clone(from),
            },
            Conversion::Structured { to, from } => Conversion::Structured {
                to: Arc::clone(to),
                from: Arc::clone(from),
            },
        }
    }
}

/// A named converter for one or more custom value kinds.
///
/// Codecs are immutable once built and cheap to clone.
pub struct Codec<C: CustomValue> {
    name: String,
    kinds: Vec<C::Kind>,
    conversion: Conversion<C>,
}

impl<C: CustomValue> Codec<C> {
    /// Codec whose payload is a single string, written as
    /// `PREFIX NAME DELIMITER PAYLOAD`.
    ///
    /// `from_primitive` must invert `to_primitive`.
    pub fn text<Enc, Dec>(
        name: impl Into<String>,
        kind: C::Kind,
        to_primitive: Enc,
        from_primitive: Dec,
    ) -> Self
    where
        Enc: Fn(&C) -> Result<String, CodecError> + Send + Sync + 'static,
        Dec: Fn(&str) -> Result<C, CodecError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kinds: vec![kind],
            conversion: Conversion::Text {
                to: Arc::new(to_primitive),
                from: Arc::new(from_primitive),
            },
        }
    }

    /// Codec whose payload is a value tree, written as a wrapper object.
    ///
    /// The tree returned by `to_primitive` may itself contain custom values;
    /// they are tagged recursively. `from_primitive` receives the inner tree
    /// with those values already restored.
    pub fn structured<Enc, Dec>(
        name: impl Into<String>,
        kind: C::Kind,
        to_primitive: Enc,
        from_primitive: Dec,
    ) -> Self
    where
        Enc: Fn(&C) -> Result<Value<C>, CodecError> + Send + Sync + 'static,
        Dec: Fn(Value<C>) -> Result<C, CodecError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kinds: vec![kind],
            conversion: Conversion::Structured {
                to: Arc::new(to_primitive),
                from: Arc::new(from_primitive),
            },
        }
    }

    /// Widens the codec's domain to another kind.
    pub fn also_handles(mut self, kind: C::Kind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kinds handled by this codec, in the order they were declared.
    pub fn kinds(&self) -> &[C::Kind] {
        &self.kinds
    }

    pub fn handles(&self, kind: C::Kind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.conversion, Conversion::Structured { .. })
    }

    /// Runs the codec's encode function.
    pub fn to_primitive(&self, value: &C) -> Result<Payload<C>, CodecError> {
        match &self.conversion {
            Conversion::Text { to, .. } => to(value).map(Payload::Text),
            Conversion::Structured { to, .. } => to(value).map(Payload::Tree),
        }
    }

    /// Runs the codec's decode function.
    ///
    /// A text codec accepts a tree payload only when it is a string; a
    /// structured codec receives a text payload as [`Value::Str`].
    pub fn from_primitive(&self, payload: Payload<C>) -> Result<C, CodecError> {
        match (&self.conversion, payload) {
            (Conversion::Text { from, .. }, Payload::Text(s)) => from(&s),
            (Conversion::Text { from, .. }, Payload::Tree(Value::Str(s))) => from(&s),
            (Conversion::Text { .. }, Payload::Tree(other)) => Err(format!(
                "expected a string payload, got {}",
                other.shape()
            )
            .into()),
            (Conversion::Structured { from, .. }, Payload::Text(s)) => from(Value::Str(s)),
            (Conversion::Structured { from, .. }, Payload::Tree(tree)) => from(tree),
        }
    }
}

impl<C: CustomValue> Clone for Codec<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kinds: self.kinds.clone(),
            conversion: self.conversion.clone(),
        }
    }
}

impl<C: CustomValue> fmt::Debug for Codec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.name)
            .field("kinds", &self.kinds)
            .field("structured", &self.is_structured())
            .finish()
    }
}
