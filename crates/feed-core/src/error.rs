//! Error types for feed operations.
//!
//! This module defines [`FeedError`] which covers all error cases that can occur
//! when fetching, normalizing, or caching market data.

use thiserror::Error;

/// Errors that can occur during feed operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network-related errors from the provider transport (connection failures,
    /// protocol errors, timeouts).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing provider data or configuration values.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error interacting with the cache backend.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The requested operation is not supported by the provider.
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// An invalid parameter or malformed record was encountered.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FeedError`].
pub type Result<T> = std::result::Result<T, FeedError>;
