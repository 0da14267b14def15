//! Client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::{RetryPolicy, SessionSettings};

/// Base URL of the production API.
pub const PRODUCTION_BASE_URL: &str = "https://xrpl.sale/api";

/// Base URL of the testnet API.
pub const TESTNET_BASE_URL: &str = "https://testnet.xrpl.sale/api";

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("xrpl-sale-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Platform environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live platform.
    #[default]
    Production,
    /// Test network.
    Testnet,
}

impl Environment {
    /// Returns the API base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Testnet => TESTNET_BASE_URL,
        }
    }

    /// Returns the lowercase environment name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ClientConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(Self::Production),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ClientConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Error raised while constructing a [`ClientConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientConfigError {
    /// The API key is empty.
    #[error("API key must not be empty")]
    MissingApiKey,

    /// The API key cannot be sent in an HTTP header.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The environment name is not recognized.
    #[error("Unknown environment '{0}': expected production or testnet")]
    UnknownEnvironment(String),

    /// The request timeout is zero.
    #[error("Timeout must be greater than 0")]
    InvalidTimeout,

    /// The retry delay is zero.
    #[error("Retry delay must be greater than 0")]
    InvalidRetryDelay,
}

/// Immutable configuration of an XRPL.Sale client.
///
/// Use [`ClientConfig::new`] when only an API key is needed and
/// [`ClientConfig::builder`] for everything else.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use xrpl_sale::client::{ClientConfig, Environment};
///
/// let config = ClientConfig::builder("sk_test_123")
///     .environment(Environment::Testnet)
///     .max_retries(5)
///     .retry_delay(Duration::from_millis(250))
///     .webhook_secret("whsec_abc")
///     .build()?;
///
/// assert_eq!(config.base_url(), "https://testnet.xrpl.sale/api");
/// # Ok::<(), xrpl_sale::client::ClientConfigError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    environment: Environment,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    webhook_secret: Option<String>,
}

impl ClientConfig {
    /// Default request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with defaults for everything but the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a valid header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientConfigError> {
        Self::builder(api_key).build()
    }

    /// Starts building a configuration.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Base URL derived from the environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }

    /// Total timeout applied to each request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of retries after a transport failure.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the first retry.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Secret used to verify webhook signatures, if configured.
    #[must_use]
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    /// Retry policy derived from `max_retries` and `retry_delay`.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(self.max_retries)
            .with_base_delay(self.retry_delay)
    }

    /// Session settings: timeout plus authentication and content headers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidApiKey`] if the key cannot be
    /// placed in the `Authorization` header.
    pub fn session_settings(&self) -> Result<SessionSettings, ClientConfigError> {
        let mut default_headers = http::HeaderMap::new();
        default_headers.insert(AUTHORIZATION, bearer_header(&self.api_key)?);
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        Ok(SessionSettings {
            timeout: self.timeout,
            default_headers,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn bearer_header(api_key: &str) -> Result<HeaderValue, ClientConfigError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| ClientConfigError::InvalidApiKey)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Builder for [`ClientConfig`].
#[derive(Clone)]
#[must_use]
pub struct ClientConfigBuilder {
    api_key: String,
    environment: Environment,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    webhook_secret: Option<String>,
}

impl ClientConfigBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: Environment::default(),
            timeout: ClientConfig::DEFAULT_TIMEOUT,
            max_retries: RetryPolicy::DEFAULT_MAX_RETRIES,
            retry_delay: RetryPolicy::DEFAULT_BASE_DELAY,
            webhook_secret: None,
        }
    }

    /// Sets the environment.
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the per-request timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of retries after a transport failure.
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the webhook verification secret.
    pub fn webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Validates the settings and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is empty or not a valid header value
    /// - The timeout or retry delay is zero
    pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ClientConfigError::MissingApiKey);
        }
        bearer_header(&self.api_key)?;

        if self.timeout.is_zero() {
            return Err(ClientConfigError::InvalidTimeout);
        }

        if self.retry_delay.is_zero() {
            return Err(ClientConfigError::InvalidRetryDelay);
        }

        Ok(ClientConfig {
            api_key: self.api_key,
            environment: self.environment,
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            webhook_secret: self.webhook_secret,
        })
    }
}
