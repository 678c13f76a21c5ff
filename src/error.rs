//! Error types for docsplit library.

use std::io;
use thiserror::Error;

/// Result type alias for docsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// The processing configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The input is not valid decoded text.
    #[error("Invalid input at byte {offset}: {message}")]
    Input {
        /// Byte offset of the first offending byte
        offset: usize,
        /// Description of the problem
        message: String,
    },

    /// An internal consistency check failed.
    ///
    /// This indicates a defect in the pipeline itself and is fatal to the
    /// current call only.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The caller cancelled processing before it completed.
    #[error("Processing was cancelled")]
    Cancelled,

    /// I/O error when reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing extracted content.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Check if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is an input error.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input { .. })
    }

    /// Check if this is an internal invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
