//! [`Registry`] — the ordered set of codecs known to a serializer.
//!
//! Names and kinds are indexed as codecs are registered, so that both
//! lookups used by the transformer are direct:
//!
//! - encode resolves a custom value by its [`CustomValue::kind`];
//! - decode resolves a tag by its name.
//!
//! Overlapping domains are rejected at registration, never resolved by
//! registration order.

use std::collections::HashMap;

use crate::codec::Codec;
use crate::error::{EncodeError, RegistryError};
use crate::tag::TagSyntax;
use crate::value::{CustomValue, Value};

pub struct Registry<C: CustomValue> {
    syntax: TagSyntax,
    codecs: Vec<Codec<C>>,
    by_name: HashMap<String, usize>,
    by_kind: HashMap<C::Kind, usize>,
}

impl<C: CustomValue> Registry<C> {
    pub fn new(syntax: TagSyntax) -> Self {
        Self {
            syntax,
            codecs: Vec::new(),
            by_name: HashMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Builds a registry from a list of codecs, stopping at the first
    /// rejected one.
    pub fn with_codecs<I>(syntax: TagSyntax, codecs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Codec<C>>,
    {
        let mut registry = Self::new(syntax);
        for codec in codecs {
            registry.register(codec)?;
        }
        log::debug!("built codec registry with {} codec(s)", registry.len());
        Ok(registry)
    }

    /// Adds a codec.
    ///
    /// # Errors
    ///
    /// - `RegistryError::InvalidName` if the name is empty or contains the
    ///   tag prefix or delimiter
    /// - `RegistryError::DuplicateName` if the name is taken
    /// - `RegistryError::AmbiguousType` if any kind of the codec is already
    ///   handled by another codec
    ///
    /// A rejected codec leaves the registry unchanged.
    pub fn register(&mut self, codec: Codec<C>) -> Result<(), RegistryError> {
        self.syntax.validate_name(codec.name())?;
        if self.by_name.contains_key(codec.name()) {
            return Err(RegistryError::DuplicateName(codec.name().to_string()));
        }
        for kind in codec.kinds() {
            if let Some(&existing) = self.by_kind.get(kind) {
                return Err(RegistryError::AmbiguousType {
                    kind: format!("{kind:?}"),
                    existing: self.codecs[existing].name().to_string(),
                    incoming: codec.name().to_string(),
                });
            }
        }

        let index = self.codecs.len();
        self.by_name.insert(codec.name().to_string(), index);
        for &kind in codec.kinds() {
            self.by_kind.insert(kind, index);
        }
        log::trace!("registered codec {:?} for {:?}", codec.name(), codec.kinds());
        self.codecs.push(codec);
        Ok(())
    }

    /// Resolves the codec for a value node.
    ///
    /// Returns `Ok(None)` for primitive nodes, which need no conversion.
    ///
    /// # Errors
    ///
    /// `EncodeError::UnsupportedType` if the node is a custom value whose
    /// kind no codec handles.
    pub fn find_by_value(&self, value: &Value<C>) -> Result<Option<&Codec<C>>, EncodeError> {
        match value {
            Value::Custom(custom) => self.find_by_kind(custom.kind()).map(Some).ok_or_else(|| {
                EncodeError::UnsupportedType {
                    type_name: format!("{:?}", custom.kind()),
                }
            }),
            _ => Ok(None),
        }
    }

    pub fn find_by_kind(&self, kind: C::Kind) -> Option<&Codec<C>> {
        self.by_kind.get(&kind).map(|&i| &self.codecs[i])
    }

    /// Exact lookup by tag name.
    pub fn find_by_name(&self, name: &str) -> Option<&Codec<C>> {
        self.by_name.get(name).map(|&i| &self.codecs[i])
    }

    pub fn syntax(&self) -> &TagSyntax {
        &self.syntax
    }

    /// Codecs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Codec<C>> {
        self.codecs.iter()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl<C: CustomValue> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self {
            syntax: self.syntax.clone(),
            codecs: self.codecs.clone(),
            by_name: self.by_name.clone(),
            by_kind: self.by_kind.clone(),
        }
    }
}

impl<C: CustomValue> std::fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("syntax", &self.syntax)
            .field("codecs", &self.codecs)
            .finish()
    }
}
