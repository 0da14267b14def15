//! Production HTTP client implementation using reqwest.

use super::{Connector, HttpClient, HttpError, HttpRequest, HttpResponse, SessionSettings};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait. Connection pooling is inherited from reqwest,
/// so one `ReqwestClient` is the executor's whole session.
///
/// Built by [`ReqwestConnector`], which bakes the session timeout and
/// default headers into the wrapped client.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use xrpl_sale::http::{Connector, HttpClient, HttpRequest, ReqwestConnector, SessionSettings};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SessionSettings {
///     timeout: Duration::from_secs(30),
///     default_headers: http::HeaderMap::new(),
/// };
/// let client = ReqwestConnector.connect(&settings)?;
/// let url = Url::parse("https://xrpl.sale/api/ping")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Wraps an already configured reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

/// Connector that opens [`ReqwestClient`] sessions.
///
/// Each session is a fresh `reqwest::Client` carrying the session timeout
/// and default headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Client = ReqwestClient;

    fn connect(&self, settings: &SessionSettings) -> Result<ReqwestClient, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .default_headers(settings.default_headers.clone())
            .build()
            .map_err(|e| HttpError::Setup(Box::new(e)))?;

        Ok(ReqwestClient::from_client(client))
    }
}
