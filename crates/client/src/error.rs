//! Error types for the API client

use thiserror::Error;

/// Result type alias using the client Error
pub type Result<T> = std::result::Result<T, Error>;

/// API client error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Response is missing expected field: {0}")]
    MissingField(&'static str),
}
