//! Core types for hydration payload compression: the payload value model,
//! errors, configuration and the script stacks fragments are pushed onto.

pub mod config;
pub mod error;
pub mod script;
pub mod value;

pub use config::{CompressConfig, DecodeMode};
pub use error::{HydrateError, Result};
pub use script::{ScriptFragment, ScriptSink, ScriptStack};
pub use value::{Object, PropertyKey, Prototype, Value};

#[cfg(test)]
mod tests;
