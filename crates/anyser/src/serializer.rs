//! [`Serializer`] — one registry composed with one backend.

use serde_json::Value as JsonValue;

use crate::backend::Backend;
use crate::codec::Codec;
use crate::error::{DecodeError, EncodeError, RegistryError, SerializerError};
use crate::options::SerializerOptions;
use crate::registry::Registry;
use crate::tag::TagSyntax;
use crate::tagging::{TagDecoder, TagEncoder};
use crate::value::{CustomValue, Value};

/// Serializes value trees containing custom values through a primitive-only
/// backend.
///
/// The serializer keeps no per-call state; share it freely (for example
/// behind an `Arc`) across threads.
pub struct Serializer<C: CustomValue, B> {
    registry: Registry<C>,
    backend: B,
}

impl<C: CustomValue, B: Backend> Serializer<C, B> {
    /// Builds a serializer with the default `$` prefix and `:` delimiter.
    pub fn new<I>(codecs: I, backend: B) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Codec<C>>,
    {
        Self::with_options(codecs, backend, &SerializerOptions::default())
    }

    pub fn with_options<I>(
        codecs: I,
        backend: B,
        options: &SerializerOptions,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Codec<C>>,
    {
        let syntax = TagSyntax::new(options)?;
        let registry = Registry::with_codecs(syntax, codecs)?;
        Ok(Self::from_registry(registry, backend))
    }

    pub fn from_registry(registry: Registry<C>, backend: B) -> Self {
        log::debug!(
            "serializer ready: {} codec(s), prefix {:?}, delimiter {:?}",
            registry.len(),
            registry.syntax().prefix(),
            registry.syntax().delimiter()
        );
        Self { registry, backend }
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Tags a value tree without running the backend.
    pub fn to_primitive(&self, value: &Value<C>) -> Result<JsonValue, EncodeError> {
        TagEncoder::new(&self.registry).encode(value).inspect_err(|e| {
            log::debug!("tag encode failed: {e}");
        })
    }

    /// Restores custom values in a primitive tree without running the
    /// backend.
    pub fn from_primitive(&self, tree: JsonValue) -> Result<Value<C>, DecodeError> {
        TagDecoder::new(&self.registry).decode(tree).inspect_err(|e| {
            log::debug!("tag decode failed: {e}");
        })
    }

    /// `backend.encode(to_primitive(value))`.
    pub fn serialize(&self, value: &Value<C>) -> Result<B::Output, SerializerError> {
        let tree = self.to_primitive(value)?;
        self.backend
            .encode(&tree)
            .map_err(|e| SerializerError::Backend(Box::new(e)))
    }

    /// `from_primitive(backend.decode(input))`.
    pub fn deserialize(&self, input: &B::Input) -> Result<Value<C>, SerializerError> {
        let tree = self
            .backend
            .decode(input)
            .map_err(|e| SerializerError::Backend(Box::new(e)))?;
        Ok(self.from_primitive(tree)?)
    }
}

impl<C: CustomValue, B: Clone> Clone for Serializer<C, B> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            backend: self.backend.clone(),
        }
    }
}

impl<C: CustomValue, B: std::fmt::Debug> std::fmt::Debug for Serializer<C, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer")
            .field("registry", &self.registry)
            .field("backend", &self.backend)
            .finish()
    }
}
