//! Request dispatch with lazy session management and retry.

use std::fmt;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::http::{
    Connector, HttpClient, HttpRequest, HttpResponse, IsRetryable, ReqwestConnector, RetryPolicy,
    SessionSettings,
};
use crate::time::{Sleeper, TokioSleeper};

use super::{ApiError, ApiResult, ClientConfig, ClientConfigError};

/// Methods accepted by [`RequestExecutor::execute`].
const SUPPORTED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];

/// A single API call, relative to the environment base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path below the base URL, e.g. `/projects/p1`
    pub path: String,
    /// Optional JSON body
    pub body: Option<Value>,
    /// Query parameters, URL-encoded onto the request URL
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a request with no body and no query.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

/// An open session: the configured client plus the token that
/// [`RequestExecutor::close`] cancels.
struct Session<T> {
    client: T,
    closed: CancellationToken,
}

/// Executes API requests with authentication, retry and error mapping.
///
/// The HTTP session is opened lazily through the [`Connector`] on first
/// use and shared by all concurrent calls. [`close`](Self::close) tears it
/// down; the next call opens a fresh one.
///
/// Transport failures are retried up to `max_retries` times with
/// exponential backoff (`retry_delay * 2^attempt`). HTTP error statuses
/// and malformed bodies are never retried.
///
/// # Type Parameters
///
/// - `C`: The connector that opens sessions (defaults to [`ReqwestConnector`])
/// - `S`: The sleeper used for backoff delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use xrpl_sale::client::{ClientConfig, RequestExecutor};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("sk_live_123")?;
/// let executor = RequestExecutor::new(&config)?;
///
/// let projects = executor.get("/projects", vec![("page".into(), "1".into())]).await?;
/// println!("{projects}");
///
/// executor.close().await;
/// # Ok(())
/// # }
/// ```
pub struct RequestExecutor<C: Connector = ReqwestConnector, S = TokioSleeper> {
    connector: C,
    sleeper: S,
    base_url: String,
    settings: SessionSettings,
    retry_policy: RetryPolicy,
    session: RwLock<Option<Arc<Session<C::Client>>>>,
}

impl RequestExecutor {
    /// Creates an executor backed by reqwest and real timers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidApiKey`] if the API key cannot
    /// be sent as a header.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientConfigError> {
        Self::from_parts(config, ReqwestConnector, TokioSleeper)
    }
}

impl<C: Connector, S> RequestExecutor<C, S> {
    /// Creates an executor with a custom connector and sleeper.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidApiKey`] if the API key cannot
    /// be sent as a header.
    pub fn from_parts(
        config: &ClientConfig,
        connector: C,
        sleeper: S,
    ) -> Result<Self, ClientConfigError> {
        Ok(Self {
            connector,
            sleeper,
            base_url: config.base_url().to_string(),
            settings: config.session_settings()?,
            retry_policy: config.retry_policy(),
            session: RwLock::new(None),
        })
    }

    /// Replaces the sleeper used for backoff delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RequestExecutor<C, S2> {
        RequestExecutor {
            connector: self.connector,
            sleeper,
            base_url: self.base_url,
            settings: self.settings,
            retry_policy: self.retry_policy,
            session: self.session,
        }
    }

    /// Overrides the base URL, e.g. to target a local server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The retry policy applied to transport failures.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Settings used when a session is opened.
    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The connector that opens sessions.
    #[must_use]
    pub const fn connector(&self) -> &C {
        &self.connector
    }

    /// Returns true while a session is open.
    pub async fn is_open(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Closes the session, cancelling requests still in flight on it.
    ///
    /// Idempotent; does nothing if no session was ever opened.
    pub async fn close(&self) {
        let closed = self.session.write().await.take();
        if let Some(session) = closed {
            session.closed.cancel();
            tracing::debug!("Closed API session for {}", self.base_url);
        }
    }

    /// Returns the open session, opening one if needed.
    async fn session(&self) -> ApiResult<Arc<Session<C::Client>>> {
        {
            let guard = self.session.read().await;
            if let Some(session) = guard.as_ref() {
                return Ok(Arc::clone(session));
            }
        }

        let mut guard = self.session.write().await;
        if let Some(session) = guard.as_ref() {
            return Ok(Arc::clone(session));
        }

        let client = self
            .connector
            .connect(&self.settings)
            .map_err(|source| ApiError::Network {
                attempts: 0,
                source,
            })?;
        let session = Arc::new(Session {
            client,
            closed: CancellationToken::new(),
        });
        *guard = Some(Arc::clone(&session));
        tracing::debug!("Opened API session for {}", self.base_url);

        Ok(session)
    }

    /// Resolves an [`ApiRequest`] into a concrete HTTP request.
    fn build_request(&self, request: ApiRequest) -> ApiResult<HttpRequest> {
        if !SUPPORTED_METHODS.contains(&request.method) {
            return Err(ApiError::InvalidRequest(format!(
                "Unsupported HTTP method: {}",
                request.method
            )));
        }

        let path = if request.path.starts_with('/') {
            request.path
        } else {
            format!("/{}", request.path)
        };

        let mut url = url::Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid URL for '{path}': {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut http_request = HttpRequest::new(request.method, url);
        if let Some(body) = request.body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|e| ApiError::InvalidRequest(format!("Unserializable body: {e}")))?;
            http_request = http_request.with_body(bytes);
        }

        Ok(http_request)
    }
}

impl<C: Connector, S: Sleeper> RequestExecutor<C, S> {
    /// Executes a request and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ApiError::InvalidRequest`] for unsupported methods or unusable paths
    /// - [`ApiError::Network`] once transport failures exhaust the retries
    /// - [`ApiError::InvalidJson`] if the body is not JSON
    /// - A status variant ([`ApiError::NotFound`], ...) for error responses
    /// - [`ApiError::Cancelled`] if the session is closed mid-request
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        self.execute_cancellable(request, &CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), but aborts the in-flight attempt or
    /// backoff as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute); cancellation yields
    /// [`ApiError::Cancelled`].
    pub async fn execute_cancellable(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<Value> {
        let request = self.build_request(request)?;
        let session = self.session().await?;

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(
                "{} {} (attempt {}/{})",
                request.method,
                request.url,
                attempt.saturating_add(1),
                self.retry_policy.max_attempts()
            );

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::Cancelled),
                () = session.closed.cancelled() => return Err(ApiError::Cancelled),
                outcome = session.client.request(request.clone()) => outcome,
            };

            let error = match outcome {
                Ok(response) => return Self::handle_response(response),
                Err(error) => error,
            };

            if !error.is_retryable() || !self.retry_policy.should_retry(attempt) {
                return Err(ApiError::Network {
                    attempts: attempt.saturating_add(1),
                    source: error,
                });
            }

            let delay = self.retry_policy.delay_for_retry(attempt);
            tracing::warn!(
                "{} {} failed: {error}; retrying in {delay:?}",
                request.method,
                request.url
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::Cancelled),
                () = session.closed.cancelled() => return Err(ApiError::Cancelled),
                () = self.sleeper.sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// Parses a response body and maps error statuses.
    ///
    /// Error statuses keep their variant even when the body is not JSON
    /// (gateways answer with HTML or nothing); details are then `Null`.
    fn handle_response(response: HttpResponse) -> ApiResult<Value> {
        let status = response.status;

        if response.is_error() {
            let details = serde_json::from_slice(&response.body).unwrap_or_else(|_| {
                tracing::debug!(
                    "{status} reply is not JSON: {}",
                    response.body_text().unwrap_or("<binary body>")
                );
                Value::Null
            });
            return Err(ApiError::from_response(status, details));
        }

        serde_json::from_slice(&response.body)
            .map_err(|source| ApiError::InvalidJson { status, source })
    }

    /// Sends a GET request with the given query parameters.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get(&self, path: &str, query: Vec<(String, String)>) -> ApiResult<Value> {
        self.execute(ApiRequest::get(path).with_query_pairs(query))
            .await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post(&self, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let mut request = ApiRequest::post(path);
        request.body = body;
        self.execute(request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn patch(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.execute(ApiRequest::patch(path).with_json(body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.execute(ApiRequest::delete(path)).await
    }
}

impl<C: Connector, S> fmt::Debug for RequestExecutor<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("timeout", &self.settings.timeout)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}
