//! `/webhooks` endpoints and inbound verification.

use serde_json::Value;

use super::segment;
use crate::client::{ApiResult, RequestExecutor};
use crate::http::{Connector, ReqwestConnector};
use crate::time::{Sleeper, TokioSleeper};
use crate::webhook::{WebhookError, WebhookEvent, WebhookReceiver, WebhookVerifier};

/// Webhook subscriptions, plus verification of deliveries using the
/// client's configured secret.
#[derive(Debug)]
pub struct WebhooksService<'a, C: Connector = ReqwestConnector, S = TokioSleeper> {
    executor: &'a RequestExecutor<C, S>,
    verifier: &'a WebhookVerifier,
}

impl<'a, C: Connector, S: Sleeper> WebhooksService<'a, C, S> {
    #[must_use]
    pub const fn new(executor: &'a RequestExecutor<C, S>, verifier: &'a WebhookVerifier) -> Self {
        Self { executor, verifier }
    }

    /// Subscribes an endpoint to events.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn register(&self, webhook: Value) -> ApiResult<Value> {
        self.executor.post("/webhooks", Some(webhook)).await
    }

    /// Lists subscriptions.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn list(&self) -> ApiResult<Value> {
        self.executor.get("/webhooks", Vec::new()).await
    }

    /// Applies a partial update to a subscription.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn update(&self, webhook_id: &str, updates: Value) -> ApiResult<Value> {
        let path = format!("/webhooks/{}", segment(webhook_id)?);
        self.executor.patch(&path, updates).await
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn delete(&self, webhook_id: &str) -> ApiResult<Value> {
        let path = format!("/webhooks/{}", segment(webhook_id)?);
        self.executor.delete(&path).await
    }

    /// Asks the platform to send a test delivery.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn test(&self, webhook_id: &str) -> ApiResult<Value> {
        let path = format!("/webhooks/{}/test", segment(webhook_id)?);
        self.executor.post(&path, None).await
    }

    /// Lists delivery attempts of a subscription.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn deliveries(
        &self,
        webhook_id: &str,
        page: u32,
        limit: u32,
        status: Option<&str>,
    ) -> ApiResult<Value> {
        let path = format!("/webhooks/{}/deliveries", segment(webhook_id)?);
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status".to_string(), status.to_string()));
        }
        self.executor.get(&path, query).await
    }

    /// Verifies a delivery signature with the configured or given secret.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MissingSecret`] if no secret is available.
    pub fn verify_signature(
        &self,
        payload: impl AsRef<[u8]>,
        signature: &str,
        secret: Option<&str>,
    ) -> Result<bool, WebhookError> {
        self.verifier.verify_signature(payload, signature, secret)
    }

    /// Parses a delivery payload.
    ///
    /// # Errors
    ///
    /// Returns a payload error for malformed input.
    pub fn parse_webhook(&self, payload: impl AsRef<[u8]>) -> Result<WebhookEvent, WebhookError> {
        self.verifier.parse_webhook(payload)
    }

    /// A receiver that verifies deliveries with the configured secret.
    #[must_use]
    pub fn receiver(&self) -> WebhookReceiver {
        WebhookReceiver::new(self.verifier.clone())
    }
}
