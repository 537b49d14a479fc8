//! beephook error types

use thiserror::Error;

/// beephook error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat API error
    #[error("Chat API error: {0}")]
    Chat(String),

    /// Working copy error
    #[error("Working copy error: {0}")]
    Repo(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for beephook operations
pub type Result<T> = std::result::Result<T, Error>;
