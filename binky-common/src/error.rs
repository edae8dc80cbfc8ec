//! Common error types for Binky

use thiserror::Error;

/// Common result type for Binky operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the association store, the LMS dispatcher
/// and the event router
#[derive(Error, Debug)]
pub enum Error {
    /// A live association already exists for this NFC tag
    #[error("NFC id is already associated with a playlist, remove first: {0}")]
    DuplicateAssociation(String),

    /// No live association exists for this NFC tag
    #[error("NFC tag not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or HTTP error status talking to the media server
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed RPC reply or malformed inbound event
    #[error("Decode error: {0}")]
    Decode(String),

    /// Underlying persistence failure (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors caused by the caller asking about an unknown tag
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
