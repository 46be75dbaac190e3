//! Core contracts for randjson.
//!
//! This crate defines the document tree produced by the generator, the
//! parameters that shape it, and the error type shared by the other crates.

pub mod config;
pub mod error;
pub mod node;

pub use config::{
    DEFAULT_STRING_ALPHABET, Formatting, GenerateConfig, KEY_FIRST_CHARS, KEY_REST_CHARS,
    key_capacity,
};
pub use error::{Error, Result};
pub use node::{Node, NodeKind};
