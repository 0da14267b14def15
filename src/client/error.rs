//! API error taxonomy.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::http::HttpError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every API call.
///
/// HTTP error statuses map to dedicated variants; each carries the
/// message the server sent and the full parsed body as `details`.
/// `Display` renders `[status] message` for status-bearing errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, after all retries were spent.
    #[error("Network error: {source}")]
    Network {
        /// Number of attempts made
        attempts: u32,
        /// Last transport failure
        #[source]
        source: HttpError,
    },

    /// Request rejected as invalid (400).
    #[error("[400] {message}")]
    Validation {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Missing or invalid credentials (401).
    #[error("[401] {message}")]
    Authentication {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Credentials lack the required permission (403).
    #[error("[403] {message}")]
    Authorization {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Resource does not exist (404).
    #[error("[404] {message}")]
    NotFound {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Too many requests (429).
    #[error("[429] {message}")]
    RateLimit {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Internal server error (500).
    #[error("[500] {message}")]
    Server {
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// Any other error status.
    #[error("[{}] {message}", .status.as_u16())]
    Status {
        /// HTTP status code
        status: StatusCode,
        /// Server-provided message
        message: String,
        /// Parsed response body
        details: Value,
    },

    /// The response body was not valid JSON.
    #[error("[{}] Response body is not valid JSON: {source}", .status.as_u16())]
    InvalidJson {
        /// HTTP status code of the response
        status: StatusCode,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// The response JSON did not match the expected record shape.
    #[error("Unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request was rejected before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request was cancelled or its session was closed.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Builds the error for an HTTP error response.
    ///
    /// The message is the body's `message` field, or `HTTP {status}` when
    /// absent. 401 always maps to [`ApiError::Authentication`].
    #[must_use]
    pub fn from_response(status: StatusCode, details: Value) -> Self {
        let message = details
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {}", status.as_u16()), ToString::to_string);

        match status {
            StatusCode::BAD_REQUEST => Self::Validation { message, details },
            StatusCode::UNAUTHORIZED => Self::Authentication { message, details },
            StatusCode::FORBIDDEN => Self::Authorization { message, details },
            StatusCode::NOT_FOUND => Self::NotFound { message, details },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit { message, details },
            StatusCode::INTERNAL_SERVER_ERROR => Self::Server { message, details },
            _ => Self::Status {
                status,
                message,
                details,
            },
        }
    }

    /// HTTP status code associated with the error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(400),
            Self::Authentication { .. } => Some(401),
            Self::Authorization { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Server { .. } => Some(500),
            Self::Status { status, .. } | Self::InvalidJson { status, .. } => {
                Some(status.as_u16())
            }
            Self::Network { .. }
            | Self::Decode(_)
            | Self::InvalidRequest(_)
            | Self::Cancelled => None,
        }
    }

    /// Human-readable message, without the status prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Server { message, .. }
            | Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw response body for HTTP error statuses.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation { details, .. }
            | Self::Authentication { details, .. }
            | Self::Authorization { details, .. }
            | Self::NotFound { details, .. }
            | Self::RateLimit { details, .. }
            | Self::Server { details, .. }
            | Self::Status { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Returns true for transport failures.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
