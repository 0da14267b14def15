//! Tests for HTTP request/response types and the mock transport.

use super::mock::{self, MockClient, MockConnector};
use super::{Connector, HttpClient, HttpError, HttpRequest, HttpResponse, SessionSettings};
use std::time::Duration;

fn api_url(path: &str) -> url::Url {
    url::Url::parse(&format!("https://xrpl.sale/api{path}")).unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let req = HttpRequest::new(http::Method::PATCH, api_url("/projects/p1"));

        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url.as_str(), "https://xrpl.sale/api/projects/p1");
        assert!(req.body.is_none());
    }

    #[test]
    fn get_and_post_set_method() {
        assert_eq!(HttpRequest::get(api_url("/ping")).method, http::Method::GET);
        assert_eq!(
            HttpRequest::post(api_url("/projects")).method,
            http::Method::POST
        );
    }

    #[test]
    fn with_body_sets_body() {
        let req = HttpRequest::post(api_url("/projects")).with_body(br#"{"name":"x"}"#.to_vec());

        assert_eq!(req.body.as_deref(), Some(br#"{"name":"x"}"#.as_slice()));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_error_true_for_4xx_and_5xx() {
        for code in [400, 401, 403, 404, 429, 500, 503] {
            let status = http::StatusCode::from_u16(code).unwrap();
            let resp = HttpResponse::new(status, vec![]);
            assert!(resp.is_error(), "Expected {status} to be an error");
        }
    }

    #[test]
    fn is_error_false_below_400() {
        for code in [200, 201, 204, 301, 304] {
            let status = http::StatusCode::from_u16(code).unwrap();
            let resp = HttpResponse::new(status, vec![]);
            assert!(!resp.is_error(), "Expected {status} not to be an error");
        }
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, vec![0xFF]);

        assert!(resp.body_text().is_none());
    }

    #[test]
    fn body_text_returns_valid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, br#"{"ok":true}"#.to_vec());

        assert_eq!(resp.body_text(), Some(r#"{"ok":true}"#));
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("network unavailable")));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("network unavailable")
        );
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
        assert!(HttpError::Timeout.source().is_none());
    }

    #[test]
    fn setup_error_displays_message() {
        let error = HttpError::Setup(Box::new(std::io::Error::other("no tls backend")));

        assert!(error.to_string().contains("Failed to open HTTP session"));
        assert!(error.source().is_some());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
    }
}

mod mock_transport {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            timeout: Duration::from_secs(30),
            default_headers: http::HeaderMap::new(),
        }
    }

    #[tokio::test]
    async fn replies_in_order() {
        let client = MockClient::new(vec![mock::refused(), mock::raw(200, "{}")]);

        let first = client.request(HttpRequest::get(api_url("/ping"))).await;
        let second = client.request(HttpRequest::get(api_url("/ping"))).await;

        assert!(matches!(first, Err(HttpError::Connection(_))));
        assert_eq!(second.unwrap().status, http::StatusCode::OK);
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn exhausted_script_hangs() {
        let client = MockClient::hanging();

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            client.request(HttpRequest::get(api_url("/ping"))),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn connector_records_settings_and_shares_client() {
        let connector = MockConnector::replying(vec![]);

        let first = connector.connect(&settings()).unwrap();
        let second = connector.connect(&settings()).unwrap();

        assert_eq!(connector.connects(), 2);
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(connector.last_settings().timeout, Duration::from_secs(30));
    }
}
