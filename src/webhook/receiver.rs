//! Framework-neutral adapter for incoming webhook requests.

use http::{HeaderMap, StatusCode};
use thiserror::Error;

use super::{WebhookError, WebhookEvent, WebhookVerifier};

/// Header carrying the `sha256=<hex>` signature.
pub const SIGNATURE_HEADER: &str = "x-xrpl-sale-signature";

/// Why an incoming webhook request was turned away.
#[derive(Debug, Error)]
pub enum WebhookRejection {
    /// The signature header is absent or not valid UTF-8.
    #[error("Missing signature header")]
    MissingSignature,

    /// The signature does not match the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// No secret is configured, so nothing can be verified.
    #[error("Webhook receiver misconfigured: {0}")]
    Misconfigured(#[source] WebhookError),

    /// The payload could not be parsed into an event.
    #[error("Invalid webhook payload: {0}")]
    BadPayload(#[source] WebhookError),
}

impl WebhookRejection {
    /// Status code the host framework should answer with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Verifies and parses webhook requests given their headers and raw body.
///
/// Host frameworks only need to hand over the header map and the body
/// bytes, then answer with [`WebhookRejection::status`] on failure.
///
/// # Example
///
/// ```
/// use http::{HeaderMap, HeaderValue};
/// use xrpl_sale::webhook::{SIGNATURE_HEADER, WebhookReceiver, WebhookVerifier, sign};
///
/// let receiver = WebhookReceiver::new(WebhookVerifier::new("whsec_test"));
/// let body = br#"{"id":"evt_1","type":"tier.completed","data":{"tier":2},"timestamp":"2025-01-01T00:00:00Z","version":"1.0"}"#;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&sign(body, "whsec_test")).unwrap());
///
/// let event = receiver.receive(&headers, body).unwrap();
/// assert_eq!(event.data["tier"], 2);
/// ```
#[derive(Clone)]
pub struct WebhookReceiver {
    verifier: WebhookVerifier,
    secret: Option<String>,
    verify: bool,
}

impl WebhookReceiver {
    /// Creates a receiver that verifies signatures with `verifier`.
    #[must_use]
    pub const fn new(verifier: WebhookVerifier) -> Self {
        Self {
            verifier,
            secret: None,
            verify: true,
        }
    }

    /// Uses `secret` instead of the verifier's own secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Skips signature verification and only parses payloads.
    ///
    /// Only suitable when the sender is trusted by other means.
    #[must_use]
    pub const fn without_verification(mut self) -> Self {
        self.verify = false;
        self
    }

    /// Returns true if signatures are checked.
    #[must_use]
    pub const fn verifies_signatures(&self) -> bool {
        self.verify
    }

    /// Verifies the request signature (unless disabled) and parses the body.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookRejection`] describing the failed step.
    pub fn receive(&self, headers: &HeaderMap, body: &[u8]) -> Result<WebhookEvent, WebhookRejection> {
        if self.verify {
            self.check_signature(headers, body).inspect_err(|rejection| {
                tracing::warn!("Rejected webhook delivery: {rejection}");
            })?;
        }

        self.verifier
            .parse_webhook(body)
            .map_err(WebhookRejection::BadPayload)
            .inspect_err(|rejection| tracing::warn!("Rejected webhook delivery: {rejection}"))
    }

    fn check_signature(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookRejection> {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(WebhookRejection::MissingSignature)?;

        match self
            .verifier
            .verify_signature(body, signature, self.secret.as_deref())
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(WebhookRejection::InvalidSignature),
            Err(e) => Err(WebhookRejection::Misconfigured(e)),
        }
    }
}

impl std::fmt::Debug for WebhookReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookReceiver")
            .field("verifier", &self.verifier)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("verify", &self.verify)
            .finish()
    }
}
