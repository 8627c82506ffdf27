//! Configuration sets and layered resolution.
//!
//! A [`ConfigSet`] owns typed variables registered with defaults. One call
//! to [`ConfigSet::resolve`] then layers, lowest to highest precedence:
//! 1. Registered defaults
//! 2. The TOML document
//! 3. Environment variables carrying the set's prefix

pub mod error;
pub mod loader;

pub use error::ConfigError;
pub use loader::{ConfigSet, ErrorHandling, Resolution};
