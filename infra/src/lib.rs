//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `fint_core`:
//! - **API**: reqwest client for the backend's OTP endpoints
//! - **Store**: in-memory and JSON-file auth token storage

// Re-export core types for convenience
pub use fint_core::errors::*;

/// REST backend client
pub mod api;

/// Auth token storage
pub mod store;

pub use api::HttpOtpApi;
pub use store::{FileSessionStore, MemorySessionStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP transport error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfrastructureError> for GatewayError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Status { status, message } => {
                GatewayError::Rejected { status, message }
            }
            other => GatewayError::Network(other.to_string()),
        }
    }
}
