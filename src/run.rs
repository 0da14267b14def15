//! Command execution logic.
//!
//! Maps each subcommand onto the SDK and renders the result as text for
//! stdout. API commands share [`call_api`], which is generic over the
//! transport so it can be driven against a local server in tests.

use std::path::{Path, PathBuf};

use http::Method;
use serde_json::Value;
use thiserror::Error;

use xrpl_sale::client::{ApiError, ApiRequest, XrplSaleClient};
use xrpl_sale::config::{Command, ConfigError, ValidatedConfig};
use xrpl_sale::http::Connector;
use xrpl_sale::time::Sleeper;
use xrpl_sale::webhook::{WebhookError, WebhookVerifier, sign};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration needed by the command is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    /// Failed to read a payload file.
    #[error("Failed to read payload '{}': {source}", path.display())]
    PayloadRead {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to verify or parse a webhook payload.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// The signature does not match the payload.
    #[error("Signature does not match payload")]
    SignatureMismatch,

    /// A command argument could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RunError {
    /// Returns true for errors caused by the command line rather than by
    /// the remote side or the payload contents.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidInput(_))
    }
}

/// Executes a command and returns the text to print.
///
/// # Errors
///
/// Returns an error if the command's configuration is incomplete, the
/// API call fails, or a payload cannot be read, verified or parsed.
///
/// # Coverage Note
///
/// API commands build a real client against the configured environment;
/// the command logic itself is covered through [`call_api`].
pub async fn execute(command: Command, config: &ValidatedConfig) -> Result<String, RunError> {
    match command {
        // Handled before configuration is loaded.
        Command::Init { .. } => Ok(String::new()),
        Command::Sign { payload } => {
            let secret = config.webhook_secret()?;
            Ok(sign(&read_payload(&payload)?, secret))
        }
        Command::Verify { payload, signature } => {
            verify_payload(config, &read_payload(&payload)?, &signature)
        }
        Command::Parse { payload } => parse_payload(&read_payload(&payload)?),
        command => {
            let client = XrplSaleClient::new(config.client_config()?).map_err(ConfigError::from)?;
            let result = call_api(&client, command).await;
            client.close().await;
            render(&result?)
        }
    }
}

/// Runs an API command (`ping`, `status` or `request`) on `client`.
///
/// # Errors
///
/// Returns [`RunError::InvalidInput`] for a malformed method, body or
/// query, or for a command that does not call the API, and
/// [`RunError::Api`] if the call fails.
pub async fn call_api<C: Connector, S: Sleeper>(
    client: &XrplSaleClient<C, S>,
    command: Command,
) -> Result<Value, RunError> {
    match command {
        Command::Ping => Ok(client.ping().await?),
        Command::Status => Ok(client.status().await?),
        Command::Request {
            method,
            path,
            data,
            query,
        } => {
            let request = build_request(&method, path, data.as_deref(), &query)?;
            tracing::debug!("{} {}", request.method, request.path);
            Ok(client.executor().execute(request).await?)
        }
        other => Err(RunError::InvalidInput(format!(
            "{other:?} does not call the API"
        ))),
    }
}

/// Builds an [`ApiRequest`] from `request` subcommand arguments.
fn build_request(
    method: &str,
    path: String,
    data: Option<&str>,
    query: &[String],
) -> Result<ApiRequest, RunError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| RunError::InvalidInput(format!("invalid HTTP method '{method}'")))?;

    let mut request = ApiRequest::new(method, path).with_query_pairs(parse_query(query)?);

    if let Some(data) = data {
        let body = serde_json::from_str(data)
            .map_err(|e| RunError::InvalidInput(format!("--data is not valid JSON: {e}")))?;
        request = request.with_json(body);
    }

    Ok(request)
}

/// Parses `K=V` query arguments.
fn parse_query(query: &[String]) -> Result<Vec<(String, String)>, RunError> {
    query
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| {
                    RunError::InvalidInput(format!(
                        "invalid query '{pair}': expected 'Key=Value'"
                    ))
                })
        })
        .collect()
}

fn read_payload(path: &Path) -> Result<Vec<u8>, RunError> {
    std::fs::read(path).map_err(|e| RunError::PayloadRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Checks `signature` against `payload` with the configured secret.
fn verify_payload(
    config: &ValidatedConfig,
    payload: &[u8],
    signature: &str,
) -> Result<String, RunError> {
    let verifier = WebhookVerifier::new(config.webhook_secret()?);

    if verifier.verify_signature(payload, signature, None)? {
        Ok("Signature valid".to_string())
    } else {
        tracing::warn!("Signature mismatch for {} byte payload", payload.len());
        Err(RunError::SignatureMismatch)
    }
}

/// Decodes `payload` as a webhook event and renders it as JSON.
fn parse_payload(payload: &[u8]) -> Result<String, RunError> {
    let event = WebhookVerifier::without_secret().parse_webhook(payload)?;
    tracing::debug!("Parsed {} event {}", event.event_type, event.id);

    let value = serde_json::to_value(&event)
        .map_err(|e| RunError::InvalidInput(format!("cannot render event: {e}")))?;
    render(&value)
}

fn render(value: &Value) -> Result<String, RunError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RunError::InvalidInput(format!("cannot render response: {e}")))
}
