//! `/auth` endpoints.

use serde_json::{Value, json};

use super::{decode, encode};
use crate::client::{ApiResult, RequestExecutor};
use crate::http::{Connector, ReqwestConnector};
use crate::models::{AuthRequest, AuthResponse};
use crate::time::{Sleeper, TokioSleeper};

/// Wallet authentication and user profile.
#[derive(Debug)]
pub struct AuthService<'a, C: Connector = ReqwestConnector, S = TokioSleeper> {
    executor: &'a RequestExecutor<C, S>,
}

impl<'a, C: Connector, S: Sleeper> AuthService<'a, C, S> {
    #[must_use]
    pub const fn new(executor: &'a RequestExecutor<C, S>) -> Self {
        Self { executor }
    }

    /// Exchanges a signed challenge for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`](crate::client::ApiError::InvalidRequest)
    /// without contacting the API for a malformed wallet address, otherwise
    /// any error of [`RequestExecutor::execute`].
    pub async fn authenticate(&self, request: &AuthRequest) -> ApiResult<AuthResponse> {
        request.validate()?;
        let body = encode(request)?;
        decode(self.executor.post("/auth/wallet", Some(body)).await?)
    }

    /// Renews a session token.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<AuthResponse> {
        let body = json!({ "refresh_token": refresh_token });
        decode(self.executor.post("/auth/refresh", Some(body)).await?)
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn logout(&self) -> ApiResult<Value> {
        self.executor.post("/auth/logout", None).await
    }

    /// Fetches the caller's profile.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn profile(&self) -> ApiResult<Value> {
        self.executor.get("/auth/profile", Vec::new()).await
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn update_profile(&self, updates: Value) -> ApiResult<Value> {
        self.executor.patch("/auth/profile", updates).await
    }

    /// Requests a login challenge for a wallet.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn challenge(&self, wallet_address: &str) -> ApiResult<Value> {
        let body = json!({ "wallet_address": wallet_address });
        self.executor.post("/auth/challenge", Some(body)).await
    }

    /// Submits proof of wallet ownership.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn verify_wallet(&self, verification: Value) -> ApiResult<Value> {
        self.executor.post("/auth/verify", Some(verification)).await
    }

    /// Lists the caller's permissions.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn permissions(&self) -> ApiResult<Value> {
        self.executor.get("/auth/permissions", Vec::new()).await
    }
}
