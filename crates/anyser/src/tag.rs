//! Tagged string grammar.
//!
//! A tagged string has the exact form `PREFIX NAME DELIMITER PAYLOAD`:
//!
//! - `NAME` runs up to the first `DELIMITER` and must not contain `PREFIX`;
//! - `PAYLOAD` is everything after that delimiter, verbatim.
//!
//! Registered names are checked against both markers together (see
//! [`TagSyntax::validate_name`]), so every tag parses back to its own name.
//!
//! A plain string that begins with `PREFIX` is escaped by doubling the prefix
//! (`"$x"` is written `"$$x"`). Since a name never contains the prefix, a
//! doubled prefix can never be mistaken for a tag.
//!
//! Codecs with structured payloads are written as a two-entry wrapper object
//! `{"<PREFIX>t": NAME, "v": PAYLOAD}`.

use std::borrow::Cow;

use crate::error::{DecodeError, RegistryError};
use crate::options::SerializerOptions;

/// Value key of a structured wrapper object.
pub const VALUE_KEY: &str = "v";

/// Validated prefix and delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSyntax {
    prefix: String,
    delimiter: String,
    type_key: String,
}

/// Classification of a primitive string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedString<'a> {
    /// Ordinary user string, returned unchanged.
    Plain(&'a str),
    /// Escaped user string; holds the original text with one prefix dropped.
    Escaped(&'a str),
    /// A tag naming a codec.
    Tagged { name: &'a str, payload: &'a str },
}

impl Default for TagSyntax {
    fn default() -> Self {
        Self::from_parts("$", ":")
    }
}

impl TagSyntax {
    /// Validates options and builds the syntax.
    ///
    /// Both markers must be non-empty and neither may contain the other.
    pub fn new(options: &SerializerOptions) -> Result<Self, RegistryError> {
        let SerializerOptions { prefix, delimiter } = options;
        if prefix.is_empty() {
            return Err(RegistryError::InvalidOptions("prefix must not be empty".into()));
        }
        if delimiter.is_empty() {
            return Err(RegistryError::InvalidOptions("delimiter must not be empty".into()));
        }
        if prefix.contains(delimiter.as_str()) || delimiter.contains(prefix.as_str()) {
            return Err(RegistryError::InvalidOptions(format!(
                "prefix {prefix:?} and delimiter {delimiter:?} overlap"
            )));
        }
        Ok(Self::from_parts(prefix, delimiter))
    }

    fn from_parts(prefix: &str, delimiter: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            delimiter: delimiter.to_string(),
            type_key: format!("{prefix}t"),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Type key of a structured wrapper object (`"$t"` by default).
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Checks that `name` can appear as a tag `NAME`.
    ///
    /// With multi-character markers a name can be free of both markers and
    /// still be ambiguous: `NAME DELIMITER` must neither overlap the prefix
    /// (the tag would read as an escaped string) nor contain the delimiter
    /// before its own end (the name would be cut short).
    pub fn validate_name(&self, name: &str) -> Result<(), RegistryError> {
        let head = format!("{name}{}", self.delimiter);
        let reason = if name.is_empty() {
            "name must not be empty"
        } else if name.contains(self.prefix.as_str()) {
            "name contains the tag prefix"
        } else if name.contains(self.delimiter.as_str()) {
            "name contains the tag delimiter"
        } else if head.starts_with(self.prefix.as_str()) || self.prefix.starts_with(head.as_str()) {
            "name followed by the delimiter reads as an escaped string"
        } else if head.find(self.delimiter.as_str()) != Some(name.len()) {
            "name overlaps the tag delimiter"
        } else {
            return Ok(());
        };
        Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Formats `PREFIX NAME DELIMITER PAYLOAD`.
    pub fn format_tag(&self, name: &str, payload: &str) -> String {
        let mut out = String::with_capacity(
            self.prefix.len() + name.len() + self.delimiter.len() + payload.len(),
        );
        out.push_str(&self.prefix);
        out.push_str(name);
        out.push_str(&self.delimiter);
        out.push_str(payload);
        out
    }

    /// Escapes a plain string so it cannot be read back as a tag.
    pub fn escape<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if !s.starts_with(self.prefix.as_str()) {
            return Cow::Borrowed(s);
        }
        let mut out = String::with_capacity(self.prefix.len() + s.len());
        out.push_str(&self.prefix);
        out.push_str(s);
        Cow::Owned(out)
    }

    /// Classifies a decoded primitive string.
    ///
    /// # Errors
    ///
    /// `DecodeError::MalformedTag` when the string begins with the prefix but
    /// has no delimiter, an empty name, or a name containing the prefix.
    pub fn parse<'a>(&self, s: &'a str) -> Result<ParsedString<'a>, DecodeError> {
        let Some(rest) = s.strip_prefix(self.prefix.as_str()) else {
            return Ok(ParsedString::Plain(s));
        };
        if rest.starts_with(self.prefix.as_str()) {
            return Ok(ParsedString::Escaped(rest));
        }
        let Some(at) = rest.find(self.delimiter.as_str()) else {
            return Err(malformed(s, "missing delimiter"));
        };
        let name = &rest[..at];
        if name.is_empty() {
            return Err(malformed(s, "empty tag name"));
        }
        if name.contains(self.prefix.as_str()) {
            return Err(malformed(s, "tag name contains the prefix"));
        }
        Ok(ParsedString::Tagged {
            name,
            payload: &rest[at + self.delimiter.len()..],
        })
    }
}

pub(crate) fn malformed(input: &str, reason: &'static str) -> DecodeError {
    DecodeError::MalformedTag {
        input: input.to_string(),
        reason,
    }
}
