//! Crate-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Errors from loading settings and data documents, plus everything the
/// domain layer can raise.
#[derive(Error, Debug)]
pub enum FormtreeError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid data document: {message}")]
    Data { message: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl FormtreeError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for crate-level operations.
pub type FormtreeResult<T> = Result<T, FormtreeError>;
