//! Error types shared by the mediacast services

use thiserror::Error;

/// Result alias for the shared library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the shared database, config, and text helpers
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file missing, unreadable, or a stored setting failed to parse
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
