//! Scripted HTTP client and connector for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{Connector, HttpClient, HttpError, HttpRequest, HttpResponse, SessionSettings};

/// One scripted outcome of a request.
pub type MockReply = Result<HttpResponse, HttpError>;

/// Mock HTTP client that replays a configurable sequence of replies.
///
/// Once the script is exhausted, further requests never complete, which
/// lets tests hold a request in flight.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    /// Creates a client replaying `replies` in order.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Creates a client whose every request hangs.
    pub fn hanging() -> Self {
        Self::default()
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order.
    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply,
            None => std::future::pending().await,
        }
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Mock connector handing out a shared [`MockClient`].
#[derive(Debug)]
pub struct MockConnector {
    client: Arc<MockClient>,
    connects: AtomicUsize,
    settings: Mutex<Vec<SessionSettings>>,
}

impl MockConnector {
    /// Creates a connector whose sessions all use `client`.
    pub fn new(client: MockClient) -> Self {
        Self {
            client: Arc::new(client),
            connects: AtomicUsize::new(0),
            settings: Mutex::new(Vec::new()),
        }
    }

    /// Creates a connector replaying `replies`.
    pub fn replying(replies: Vec<MockReply>) -> Self {
        Self::new(MockClient::new(replies))
    }

    /// The shared client.
    pub fn client(&self) -> &MockClient {
        &self.client
    }

    /// Number of sessions opened.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Settings of the most recently opened session.
    pub fn last_settings(&self) -> SessionSettings {
        self.settings
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a session was opened")
    }
}

impl Connector for MockConnector {
    type Client = Arc<MockClient>;

    fn connect(&self, settings: &SessionSettings) -> Result<Self::Client, HttpError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.settings.lock().unwrap().push(settings.clone());
        Ok(Arc::clone(&self.client))
    }
}

impl Connector for Arc<MockConnector> {
    type Client = Arc<MockClient>;

    fn connect(&self, settings: &SessionSettings) -> Result<Self::Client, HttpError> {
        (**self).connect(settings)
    }
}

/// A response with the given status and JSON body.
pub fn json(status: u16, body: &Value) -> MockReply {
    raw(status, &body.to_string())
}

/// A response with the given status and raw body text.
pub fn raw(status: u16, body: &str) -> MockReply {
    let status = http::StatusCode::from_u16(status).unwrap();
    Ok(HttpResponse::new(status, body.as_bytes().to_vec()))
}

/// A connection-refused transport failure.
pub fn refused() -> MockReply {
    Err(HttpError::Connection(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))))
}

/// A timeout transport failure.
pub fn timeout() -> MockReply {
    Err(HttpError::Timeout)
}
