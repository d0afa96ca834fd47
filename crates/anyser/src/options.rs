//! Serializer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling the tag grammar.
///
/// Both markers default to characters that codec names may not contain, so
/// defaults always yield a valid [`TagSyntax`](crate::TagSyntax). The struct
/// deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
    /// Reserved marker that starts every tag (`$`).
    pub prefix: String,
    /// Reserved separator between tag name and payload (`:`).
    pub delimiter: String,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            prefix: "$".to_string(),
            delimiter: ":".to_string(),
        }
    }
}
