//! Error types for SPARQL client operations
//!
//! A response body that cannot be decoded is not an error here: the client
//! returns the `NoValue` sentinel of [`QueryResult`](crate::QueryResult) /
//! [`UpdateResult`](crate::UpdateResult) instead.

use thiserror::Error;

/// Errors from client construction and request execution
#[derive(Debug, Error)]
pub enum SparqlError {
    /// The client configuration is unusable (e.g. the public query service
    /// without a user agent)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A media type that cannot be sent as an `Accept` header value
    #[error("Invalid media type: {0:?}")]
    InvalidMediaType(String),

    /// Network-level failure: connection refused, DNS, timeout, body read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SparqlError>;
