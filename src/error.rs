//! Error types for cf-ddns-sync.

use thiserror::Error;

/// Result type alias for cf-ddns-sync.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// The host's address could not be determined.
    #[error("Could not determine local address: {0}")]
    AddressUnavailable(String),

    /// The provider answered with a non-success status.
    #[error("Could not {context} | {body}")]
    ProviderUnavailable {
        context: String,
        status: u16,
        body: String,
    },

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}
