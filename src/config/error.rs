//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::{Kind, ValueError};

/// Errors during registration or resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config document is not valid UTF-8: {source}")]
    InvalidUtf8 { source: std::str::Utf8Error },

    #[error("failed to parse config document: {source}")]
    ParseDocument { source: toml::de::Error },

    #[error("unsupported value for `{key}`: {found} cannot be flattened")]
    UnsupportedValue { key: String, found: &'static str },

    #[error("invalid value {value:?} for {kind} config `{name}`: {source}")]
    InvalidValue {
        name: String,
        kind: Kind,
        value: String,
        source: ValueError,
    },

    #[error("config `{name}` is not registered")]
    NotRegistered { name: String },

    #[error("config `{name}` is already registered")]
    AlreadyRegistered { name: String },
}
