//! Error types for the huecraft library.
//!
//! Every failure is raised at the point of violation; nothing in the core
//! swallows an error. The only tolerant path is tick-label formatting, which
//! renders an empty string for ordinals past the label list.

use thiserror::Error;

/// The main error type for huecraft operations.
#[derive(Error, Debug)]
pub enum HuecraftError {
    /// Unknown palette or color name, optionally with close matches
    #[error("{}", lookup_message(.kind, .name, .suggestions))]
    Lookup {
        kind: String,
        name: String,
        suggestions: Vec<String>,
    },

    /// A descriptor carried the same suffix token more than once
    #[error("Should only contain one '{key}' but found {matches:?}")]
    MalformedName { key: String, matches: Vec<String> },

    /// Index, count or tweak parameter outside its valid range
    #[error("Out of range: {message}")]
    OutOfRange { message: String },

    /// Input of the wrong kind for a factory or combine operation
    #[error("Type mismatch: expected {expected}; received {received}")]
    TypeMismatch { expected: String, received: String },

    /// Bare color tuples supplied without saying which color model they use
    #[error("Ambiguous input: {message}")]
    AmbiguousInput { message: String },

    /// Label/tick or bin/color count disagreement
    #[error("Count mismatch: {message}")]
    CountMismatch {
        message: String,
        expected: usize,
        received: usize,
    },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn lookup_message(kind: &str, name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("Unknown {kind} '{name}'.")
    } else {
        format!("Unknown {kind} '{name}'. Did you mean one of these: {suggestions:?}?")
    }
}

impl HuecraftError {
    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        HuecraftError::OutOfRange {
            message: message.into(),
        }
    }

    /// Close matches attached to a lookup failure, empty for every other error.
    pub fn suggestions(&self) -> &[String] {
        match self {
            HuecraftError::Lookup { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// Convenience type alias for Results with HuecraftError
pub type Result<T> = std::result::Result<T, HuecraftError>;
