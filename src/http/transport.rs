//! Transport seam between the request executor and the HTTP library.
//!
//! [`Connector`] opens sessions, [`HttpClient`] performs exchanges on one.
//! Both speak plain `http`/`url` types so the executor never sees reqwest.

use std::future::Future;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use url::Url;

use super::HttpError;

/// Outgoing exchange, fully resolved against the base URL.
///
/// Authentication and content headers come from the session
/// ([`SessionSettings::default_headers`]), not from the request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL with the encoded query already applied
    pub url: Url,
    /// Serialized JSON, when the call carries a body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a bodiless request with the given method and URL.
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub const fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(bytes);
        self
    }
}

/// Status and the complete body of a reply.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// True for 4xx and 5xx replies.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Body decoded as UTF-8, or `None` for binary content.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// One open session able to perform exchanges.
///
/// Implemented by [`ReqwestClient`](super::ReqwestClient) in production and
/// by the recording mocks under `http::mock` in tests.
pub trait HttpClient: Send + Sync {
    /// Performs a single exchange. Non-2xx replies are `Ok`; only
    /// transport failures are errors.
    ///
    /// # Errors
    ///
    /// [`HttpError::Connection`] if the server cannot be reached,
    /// [`HttpError::Timeout`] if the session timeout elapses, and
    /// [`HttpError::InvalidUrl`] if the URL is rejected by the library.
    fn request(&self, req: HttpRequest) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Settings baked into a session when it is opened.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Total timeout for each request (connect + send + receive)
    pub timeout: Duration,
    /// Headers sent with every request of the session
    pub default_headers: HeaderMap,
}

/// Factory for configured [`HttpClient`]s.
///
/// The request executor calls [`Connector::connect`] lazily, the first
/// time a request needs a session, and again after the session is closed.
pub trait Connector: Send + Sync {
    /// The client type produced by this connector.
    type Client: HttpClient;

    /// Opens a new session with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Setup`] if the client cannot be built.
    fn connect(&self, settings: &SessionSettings) -> Result<Self::Client, HttpError>;
}
