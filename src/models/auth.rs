//! Wallet-based authentication.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiError, ApiResult};

static WALLET_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{25,34}$").expect("wallet address pattern is valid")
});

/// Body of `POST /auth/wallet`: a signed login challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Classic XRPL address (`r...`)
    pub wallet_address: String,
    /// Signature over the challenge
    pub signature: String,
    /// Unix timestamp the challenge was signed at
    pub timestamp: i64,
}

impl AuthRequest {
    /// Checks that the wallet address is a well-formed classic address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a malformed address.
    pub fn validate(&self) -> ApiResult<()> {
        if WALLET_ADDRESS.is_match(&self.wallet_address) {
            Ok(())
        } else {
            Err(ApiError::InvalidRequest(format!(
                "wallet_address '{}' is not a valid XRPL address",
                self.wallet_address
            )))
        }
    }
}

/// Session token issued after authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent calls
    pub token: String,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub expires_at: DateTime<Utc>,
    /// Raw tier information; see [`UserTier`] for the typed form
    pub user_tier: Map<String, Value>,
}

impl AuthResponse {
    /// Decodes `user_tier` into a [`UserTier`], if it has that shape.
    #[must_use]
    pub fn tier(&self) -> Option<UserTier> {
        serde_json::from_value(Value::Object(self.user_tier.clone())).ok()
    }
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("user_tier", &self.user_tier)
            .finish()
    }
}

/// Investor tier and its privileges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTier {
    pub tier: String,
    /// Allocation multiplier
    pub multiplier: f64,
    /// Hours of early access before public sale
    pub early_access: i64,
    /// Whether the allocation is guaranteed
    pub guaranteed: bool,
}
