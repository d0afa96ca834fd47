//! Tagging transformer.
//!
//! [`TagEncoder`] walks a value tree before the backend runs, replacing
//! custom values with tagged strings (or wrapper objects). [`TagDecoder`]
//! walks the backend's output and restores them. Both walks are depth-first
//! and keep array and object order. Neither ever calls the backend.

pub mod decoder;
pub mod encoder;

pub use decoder::TagDecoder;
pub use encoder::TagEncoder;
