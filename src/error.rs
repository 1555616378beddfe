//! Error types for salience.

use thiserror::Error;

/// Result type for salience operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for salience operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document or embedding file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document carries no `nlp_data`; it has not been annotated yet.
    #[error("Document has no annotation data (nlp_data missing)")]
    NotAnnotated,

    /// Two entity spans claim overlapping token ranges during rewriting.
    #[error("Overlapping entity spans: {first} and {second}")]
    OverlappingSpans {
        /// Label (or surface text) of the earlier span.
        first: String,
        /// Label (or surface text) of the later span.
        second: String,
    },
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
