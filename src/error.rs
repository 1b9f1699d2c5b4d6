//! Error types for brokr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in brokr
#[derive(Debug, Error)]
pub enum BrokrError {
    /// Invalid tool parameter supplied by the caller
    #[error("{0}")]
    InvalidParam(String),

    /// Configuration loading or validation error
    #[error("Config error: {0}")]
    Config(String),

    /// Missing credentials in the environment
    #[error("Missing credentials: environment variable {0} not set")]
    MissingCredentials(String),

    /// Brokerage API returned a non-success status
    #[error("Alpaca API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Unknown tool name in a dispatch request
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for brokr operations
pub type Result<T> = std::result::Result<T, BrokrError>;
