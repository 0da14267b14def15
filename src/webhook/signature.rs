//! HMAC-SHA256 signature verification and payload parsing.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{WebhookError, WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Computes the signature header value for `payload`: `sha256=<hex>`.
///
/// # Example
///
/// ```
/// use xrpl_sale::webhook::sign;
///
/// let signature = sign(br#"{"id":"evt_1"}"#, "whsec_test");
/// assert!(signature.starts_with("sha256="));
/// assert_eq!(signature.len(), "sha256=".len() + 64);
/// ```
#[must_use]
pub fn sign(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any size key");
    mac.update(payload);
    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies webhook signatures and parses webhook payloads.
///
/// The verifier is stateless apart from its optional secret and can be
/// shared freely between threads.
///
/// # Example
///
/// ```
/// use xrpl_sale::webhook::{WebhookVerifier, sign};
///
/// let verifier = WebhookVerifier::new("whsec_test");
/// let body = br#"{"id":"evt_1","type":"project.created","data":{},"timestamp":"2025-01-01T00:00:00Z","version":"1.0"}"#;
/// let signature = sign(body, "whsec_test");
///
/// assert!(verifier.verify_signature(body, &signature, None)?);
/// let event = verifier.parse_webhook(body)?;
/// assert_eq!(event.id, "evt_1");
/// # Ok::<(), xrpl_sale::webhook::WebhookError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WebhookVerifier {
    secret: Option<String>,
}

impl WebhookVerifier {
    /// Creates a verifier with a default secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    /// Creates a verifier whose callers must pass a secret explicitly.
    #[must_use]
    pub const fn without_secret() -> Self {
        Self { secret: None }
    }

    /// Creates a verifier from an optional secret.
    #[must_use]
    pub fn from_secret(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Returns true if a default secret is configured.
    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Checks `signature` against the HMAC-SHA256 of `payload`.
    ///
    /// `secret` overrides the verifier's own secret when given. A mismatch
    /// returns `Ok(false)`; the comparison takes the same time wherever the
    /// two values first differ, including when their lengths differ.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MissingSecret`] if neither an explicit nor a
    /// default secret is available. Empty secrets count as missing.
    pub fn verify_signature(
        &self,
        payload: impl AsRef<[u8]>,
        signature: &str,
        secret: Option<&str>,
    ) -> Result<bool, WebhookError> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .or_else(|| self.secret.as_deref().filter(|s| !s.is_empty()))
            .ok_or(WebhookError::MissingSecret)?;

        let expected = sign(payload.as_ref(), secret);
        Ok(constant_time_eq(expected.as_bytes(), signature.as_bytes()))
    }

    /// Decodes a webhook payload into a [`WebhookEvent`].
    ///
    /// Does not check the signature.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidEncoding`] for non-UTF-8 bytes and
    /// [`WebhookError::InvalidPayload`] for anything that is not a JSON
    /// object of the event shape.
    pub fn parse_webhook(&self, payload: impl AsRef<[u8]>) -> Result<WebhookEvent, WebhookError> {
        let text = std::str::from_utf8(payload.as_ref()).map_err(WebhookError::InvalidEncoding)?;
        serde_json::from_str(text).map_err(WebhookError::InvalidPayload)
    }
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Compares two byte strings in time dependent only on the longer length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = a.len() ^ b.len();
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn equal_inputs_match() {
        assert!(constant_time_eq(b"sha256=abc", b"sha256=abc"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn differing_inputs_do_not_match() {
        assert!(!constant_time_eq(b"sha256=abc", b"sha256=abd"));
        assert!(!constant_time_eq(b"sha256=abc", b"sha256=ab"));
        assert!(!constant_time_eq(b"", b"x"));
    }

    #[test]
    fn prefix_padded_with_zero_bytes_does_not_match() {
        assert!(!constant_time_eq(b"abc", b"abc\0"));
    }
}
