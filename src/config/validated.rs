//! Validated configuration after merging CLI and TOML sources.
//!
//! All validation is performed during construction. The API key and the
//! webhook secret stay optional here because only some commands need them;
//! [`ValidatedConfig::client_config`] and [`ValidatedConfig::webhook_secret`]
//! enforce their presence.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{ClientConfig, Environment};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// API key, if configured
    pub api_key: Option<String>,

    /// Target environment
    pub environment: Environment,

    /// Per-request timeout
    pub timeout: Duration,

    /// Retries after a network failure
    pub max_retries: u32,

    /// Delay before the first retry
    pub retry_delay: Duration,

    /// Webhook secret, if configured
    pub webhook_secret: Option<String>,

    /// Config file the values were read from
    pub config_file: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .field("config_file", &self.config_file)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file_str = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ environment: {}, api_key: {}, timeout: {}s, retry: {}x/{}ms, \
             webhook_secret: {}, config_file: {} }}",
            self.environment,
            if self.api_key.is_some() { "set" } else { "unset" },
            self.timeout.as_secs(),
            self.max_retries,
            self.retry_delay.as_millis(),
            if self.webhook_secret.is_some() { "set" } else { "unset" },
            config_file_str,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over built-in defaults. Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The environment name is unknown
    /// - The timeout or retry delay is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = non_empty(
            cli.api_key
                .as_deref()
                .or_else(|| toml.and_then(|t| t.api.api_key.as_deref())),
        );

        let environment = Self::resolve_environment(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        let max_retries = cli
            .max_retries
            .or_else(|| toml.and_then(|t| t.retry.max_retries))
            .unwrap_or(defaults::MAX_RETRIES);

        let retry_delay = Self::resolve_retry_delay(cli, toml)?;

        let webhook_secret = non_empty(
            cli.webhook_secret
                .as_deref()
                .or_else(|| toml.and_then(|t| t.webhook.secret.as_deref())),
        );

        Ok(Self {
            api_key,
            environment,
            timeout,
            max_retries,
            retry_delay,
            webhook_secret,
            config_file: None,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Reads `--config` if given. Otherwise the default config path is read
    /// when that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    /// Builds the SDK client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no API key is configured,
    /// or [`ConfigError::Client`] if the client rejects the values.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key or set api.api_key in config file",
            )
        })?;

        let mut builder = ClientConfig::builder(api_key)
            .environment(self.environment)
            .timeout(self.timeout)
            .max_retries(self.max_retries)
            .retry_delay(self.retry_delay);
        if let Some(ref secret) = self.webhook_secret {
            builder = builder.webhook_secret(secret.clone());
        }

        Ok(builder.build()?)
    }

    /// Returns the webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret is configured.
    pub fn webhook_secret(&self) -> Result<&str, ConfigError> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::WEBHOOK_SECRET,
                "Use --webhook-secret or set webhook.secret in config file",
            )
        })
    }

    fn resolve_environment(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Environment, ConfigError> {
        let value = cli
            .environment
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.environment.as_deref()))
            .unwrap_or(defaults::ENVIRONMENT);

        value
            .parse::<Environment>()
            .map_err(|_| ConfigError::InvalidEnvironment {
                value: value.to_string(),
            })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_retry_delay(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let millis = cli
            .retry_delay_ms
            .or_else(|| toml.and_then(|t| t.retry.delay_ms))
            .unwrap_or(defaults::RETRY_DELAY_MS);

        if millis == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "retry.delay_ms",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_millis(millis))
    }
}

/// Writes the default configuration template to a file.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(write_err)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
