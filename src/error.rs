//! Error types for the PDF unlocking library.
//!
//! Expected outcomes of password resolution (a locked document, a wrong
//! password) are not errors; they are reported through
//! [`ResolveOutcome`](crate::resolver::ResolveOutcome). This type covers the
//! conditions that stop processing of a single document or a caller-side
//! operation such as reading a file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unlock operations.
pub type UnlockResult<T> = Result<T, UnlockError>;

/// Error type for all unlock operations.
#[derive(Debug, Error)]
pub enum UnlockError {
    /// Input bytes were empty
    #[error("empty document")]
    EmptyDocument,

    /// The bytes could not be parsed as a PDF container
    #[error("error opening document: {reason}")]
    Open { reason: String },

    /// Backend-specific failure (LoPDF, etc.)
    #[error("{backend} backend error: {message}")]
    Backend { backend: String, message: String },

    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },
}

impl UnlockError {
    /// Builds an [`UnlockError::Open`] from any displayable parser error.
    pub fn open(reason: impl std::fmt::Display) -> Self {
        Self::Open {
            reason: reason.to_string(),
        }
    }
}

impl From<lopdf::Error> for UnlockError {
    fn from(err: lopdf::Error) -> Self {
        Self::Backend {
            backend: "LoPDF".to_string(),
            message: err.to_string(),
        }
    }
}
