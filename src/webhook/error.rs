//! Webhook error types.

use thiserror::Error;

/// Errors raised while verifying or parsing a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No secret was configured or supplied for verification.
    #[error("Webhook secret is required for signature verification")]
    MissingSecret,

    /// The payload bytes are not UTF-8.
    #[error("Invalid webhook payload: {0}")]
    InvalidEncoding(#[source] std::str::Utf8Error),

    /// The payload is not JSON or does not have the event shape.
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

impl WebhookError {
    /// Returns true if the payload itself was at fault, as opposed to
    /// the verifier's configuration.
    #[must_use]
    pub const fn is_payload_error(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_) | Self::InvalidPayload(_))
    }
}
