//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong below the HTTP layer. Whether an error is
/// worth retrying is answered by [`IsRetryable`](super::IsRetryable).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured session timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP session could not be created.
    ///
    /// Raised by a [`Connector`](super::Connector) when the underlying
    /// client rejects its configuration (TLS backend, headers, ...).
    #[error("Failed to open HTTP session: {0}")]
    Setup(#[source] Box<dyn std::error::Error + Send + Sync>),
}
