//! Common error types for wedlist

use thiserror::Error;

/// Common result type for wedlist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the repository, the CSV importer and the HTTP layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource missing, or owned by someone else
    #[error("{0}")]
    NotFound(String),

    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Uploaded CSV could not be parsed
    #[error("Malformed CSV: {0}")]
    Parse(String),

    /// Request carried no caller identity
    #[error("{0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(what: &str) -> Self {
        Error::NotFound(format!("{} not found", what))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
