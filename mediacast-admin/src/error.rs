//! Error types for mediacast-admin
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for the admin service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Image decoding errors (unsupported or corrupt upload)
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mediacast_common::Error> for Error {
    fn from(e: mediacast_common::Error) -> Self {
        use mediacast_common::Error as Common;
        match e {
            Common::Database(e) => Error::Database(e),
            Common::Io(e) => Error::Io(e),
            Common::Config(msg) => Error::Config(msg),
            Common::NotFound(msg) => Error::NotFound(msg),
            Common::Internal(msg) => Error::Internal(msg),
        }
    }
}

/// Convenience Result type using the admin Error
pub type Result<T> = std::result::Result<T, Error>;
