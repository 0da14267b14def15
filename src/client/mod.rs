//! API client: configuration, request execution and the service facade.

mod config;
mod error;
mod executor;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod facade_tests;

pub use config::{
    ClientConfig, ClientConfigBuilder, ClientConfigError, Environment, PRODUCTION_BASE_URL,
    TESTNET_BASE_URL, USER_AGENT_VALUE,
};
pub use error::{ApiError, ApiResult};
pub use executor::{ApiRequest, RequestExecutor};

use serde_json::Value;

use crate::http::{Connector, ReqwestConnector};
use crate::services::{
    AnalyticsService, AuthService, InvestmentsService, ProjectsService, WebhooksService,
};
use crate::time::{Sleeper, TokioSleeper};
use crate::webhook::WebhookVerifier;

/// Entry point of the SDK.
///
/// Owns the configuration, the [`RequestExecutor`] and a
/// [`WebhookVerifier`] seeded with the configured webhook secret, and
/// hands out per-resource services that borrow them.
///
/// # Example
///
/// ```no_run
/// use xrpl_sale::client::{ClientConfig, Environment, XrplSaleClient};
/// use xrpl_sale::models::ListProjectsOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder("sk_test_123")
///     .environment(Environment::Testnet)
///     .build()?;
/// let client = XrplSaleClient::new(config)?;
///
/// let page = client.projects().list(&ListProjectsOptions::default()).await?;
/// for project in page.data {
///     println!("{} ({})", project.name, project.status);
/// }
///
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct XrplSaleClient<C: Connector = ReqwestConnector, S = TokioSleeper> {
    config: ClientConfig,
    executor: RequestExecutor<C, S>,
    verifier: WebhookVerifier,
}

impl XrplSaleClient {
    /// Creates a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidApiKey`] if the API key cannot
    /// be sent as a header.
    pub fn new(config: ClientConfig) -> Result<Self, ClientConfigError> {
        let executor = RequestExecutor::new(&config)?;
        Ok(Self::with_executor(config, executor))
    }

    /// Creates a production client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a valid header value.
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, ClientConfigError> {
        Self::new(ClientConfig::new(api_key)?)
    }
}

impl<C: Connector, S: Sleeper> XrplSaleClient<C, S> {
    /// Creates a client with a custom connector and sleeper.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidApiKey`] if the API key cannot
    /// be sent as a header.
    pub fn from_parts(config: ClientConfig, connector: C, sleeper: S) -> Result<Self, ClientConfigError> {
        let executor = RequestExecutor::from_parts(&config, connector, sleeper)?;
        Ok(Self::with_executor(config, executor))
    }

    /// Wraps an existing executor.
    #[must_use]
    pub fn with_executor(config: ClientConfig, executor: RequestExecutor<C, S>) -> Self {
        let verifier = WebhookVerifier::from_secret(config.webhook_secret().map(ToString::to_string));
        Self {
            config,
            executor,
            verifier,
        }
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying executor, for endpoints without a typed service.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor<C, S> {
        &self.executor
    }

    /// Verifier seeded with the configured webhook secret.
    #[must_use]
    pub const fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    /// Project endpoints.
    #[must_use]
    pub const fn projects(&self) -> ProjectsService<'_, C, S> {
        ProjectsService::new(&self.executor)
    }

    /// Investment endpoints.
    #[must_use]
    pub const fn investments(&self) -> InvestmentsService<'_, C, S> {
        InvestmentsService::new(&self.executor)
    }

    /// Analytics endpoints.
    #[must_use]
    pub const fn analytics(&self) -> AnalyticsService<'_, C, S> {
        AnalyticsService::new(&self.executor)
    }

    /// Authentication endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_, C, S> {
        AuthService::new(&self.executor)
    }

    /// Webhook endpoints and delivery verification.
    #[must_use]
    pub const fn webhooks(&self) -> WebhooksService<'_, C, S> {
        WebhooksService::new(&self.executor, &self.verifier)
    }

    /// Health check (`GET /ping`).
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn ping(&self) -> ApiResult<Value> {
        self.executor.get("/ping", Vec::new()).await
    }

    /// Platform status (`GET /status`).
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn status(&self) -> ApiResult<Value> {
        self.executor.get("/status", Vec::new()).await
    }

    /// Closes the HTTP session. The next call opens a new one.
    pub async fn close(&self) {
        self.executor.close().await;
    }
}
