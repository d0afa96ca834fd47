//! Primitive backends.
//!
//! A backend turns a primitive tree into bytes or text and back. It never sees
//! custom values; the tagging transformer runs before [`Backend::encode`] and
//! after [`Backend::decode`]. Backends must keep strings byte-for-byte and
//! must keep object key order for the ordering guarantees to hold.

use serde_json::Value as JsonValue;
use thiserror::Error;

pub trait Backend {
    /// Borrowed form accepted by [`Backend::decode`].
    type Input: ?Sized;
    /// Owned form produced by [`Backend::encode`].
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn encode(&self, tree: &JsonValue) -> Result<Self::Output, Self::Error>;

    fn decode(&self, input: &Self::Input) -> Result<JsonValue, Self::Error>;
}

/// JSON text via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend {
    pub pretty: bool,
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Backend for JsonBackend {
    type Input = str;
    type Output = String;
    type Error = serde_json::Error;

    fn encode(&self, tree: &JsonValue) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(tree)
        } else {
            serde_json::to_string(tree)
        }
    }

    fn decode(&self, input: &str) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Error)]
pub enum CborBackendError {
    #[error("cbor encode failed")]
    Encode(#[source] ciborium::ser::Error<std::io::Error>),
    #[error("cbor decode failed")]
    Decode(#[source] ciborium::de::Error<std::io::Error>),
}

/// CBOR bytes via `ciborium`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborBackend;

impl Backend for CborBackend {
    type Input = [u8];
    type Output = Vec<u8>;
    type Error = CborBackendError;

    fn encode(&self, tree: &JsonValue) -> Result<Vec<u8>, CborBackendError> {
        let mut out = Vec::new();
        ciborium::into_writer(tree, &mut out).map_err(CborBackendError::Encode)?;
        Ok(out)
    }

    fn decode(&self, input: &[u8]) -> Result<JsonValue, CborBackendError> {
        ciborium::from_reader(input).map_err(CborBackendError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_backend_keeps_key_order() {
        let backend = JsonBackend::new();
        let tree = json!({"z": 1, "a": "$$x", "m": [null, true]});
        let text = backend.encode(&tree).unwrap();
        assert_eq!(text, r#"{"z":1,"a":"$$x","m":[null,true]}"#);
        let back = backend.decode(&text).unwrap();
        let keys: Vec<&String> = back.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn json_backend_reports_parse_errors() {
        assert!(JsonBackend::new().decode("{\"a\":").is_err());
    }

    #[test]
    fn cbor_backend_round_trip() {
        let backend = CborBackend;
        let tree = json!({"id": "$uuid:152e4227-6852-4f8e-912d-bd75478c7eaa", "n": [1, -2, 2.5]});
        let bytes = backend.encode(&tree).unwrap();
        assert_eq!(backend.decode(&bytes).unwrap(), tree);
    }

    #[test]
    fn cbor_backend_rejects_truncated_input() {
        let bytes = CborBackend.encode(&json!(["abc", "def"])).unwrap();
        let err = CborBackend.decode(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(err, CborBackendError::Decode(_)));
        let source = std::error::Error::source(&err).expect("ciborium error kept as source");
        assert!(source.downcast_ref::<ciborium::de::Error<std::io::Error>>().is_some());
    }
}
