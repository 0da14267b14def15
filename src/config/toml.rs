//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API access section
    #[serde(default)]
    pub api: ApiSection,

    /// Retry policy section
    #[serde(default)]
    pub retry: RetrySection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API access section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API key
    pub api_key: Option<String>,

    /// Environment: "production" or "testnet"
    pub environment: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl std::fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Retry policy section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Number of retries after a network failure
    pub max_retries: Option<u32>,

    /// Delay before the first retry, in milliseconds
    pub delay_ms: Option<u64>,
}

/// Webhook verification section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Shared secret for signatures
    pub secret: Option<String>,
}

impl std::fmt::Debug for WebhookSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSection")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# xrpl-sale Configuration File
# Values given on the command line take precedence over this file.

[api]
# API key (required for ping, status and request)
# api_key = "sk_live_..."

# Environment: "production" or "testnet" (default: production)
environment = "production"

# Request timeout in seconds (default: 30)
# timeout = 30

[retry]
# Retries after a network failure (default: 3)
# HTTP error responses are never retried.
# max_retries = 3

# Delay before the first retry in milliseconds, doubled on each retry (default: 1000)
# delay_ms = 1000

[webhook]
# Secret used by the sign and verify commands
# secret = "whsec_..."
"#
    .to_string()
}
