use crate::schema::LeafType;
use thiserror::Error;

/// Errors that can occur while collecting raw leaf values into a parameter tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Value '{raw}' at '{path}' could not be coerced to {expected}")]
    Coercion {
        path: String,
        raw: String,
        expected: LeafType,
    },

    #[error("Path '{0}' is not a valid dotted parameter path")]
    InvalidPath(String),

    #[error("Path '{0}' does not address any leaf of the schema")]
    UnknownPath(String),

    #[error("{} parameter values could not be collected: {}", .0.len(), summarize(.0))]
    Multiple(Vec<CodecError>),
}

impl CodecError {
    /// The dotted path this error refers to, if it refers to exactly one.
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::Coercion { path, .. }
            | CodecError::InvalidPath(path)
            | CodecError::UnknownPath(path) => Some(path),
            CodecError::Multiple(_) => None,
        }
    }
}

fn summarize(errors: &[CodecError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur when loading raw values from disk.
#[derive(Error, Debug, Clone)]
pub enum DataError {
    #[error("Could not read file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse raw values JSON: {0}")]
    JsonParseError(String),

    #[error("Raw value for '{path}' must be a string, number, boolean or null")]
    UnsupportedValue { path: String },
}

/// Errors that can occur when converting a schema source's format into a `SchemaTree`.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    JsonParseError(String),

    #[error("Parameter at '{0}' has no name")]
    MissingName(String),

    #[error("Parameter '{name}' has an invalid max_occurs value: '{value}'")]
    InvalidOccurs { name: String, value: String },

    #[error("Could not read schema file '{path}': {message}")]
    Io { path: String, message: String },
}
