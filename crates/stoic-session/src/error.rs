use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Failure talking to the proxy endpoint; every variant becomes the apology message
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, details: Option<String> },

    #[error("Malformed reply: {0}")]
    Decode(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(String),
}
