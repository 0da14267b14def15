//! Tests for `XrplSaleClient`.

use super::*;
use crate::http::mock::{self, MockConnector};
use crate::time::InstantSleeper;
use crate::webhook::sign;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(replies: Vec<mock::MockReply>) -> XrplSaleClient<MockConnector, InstantSleeper> {
    let config = ClientConfig::builder("sk_test")
        .environment(Environment::Testnet)
        .webhook_secret("whsec_facade")
        .build()
        .unwrap();
    XrplSaleClient::from_parts(config, MockConnector::replying(replies), InstantSleeper).unwrap()
}

#[tokio::test]
async fn ping_and_status_hit_their_paths() {
    let client = client(vec![
        mock::json(200, &json!({"pong": true})),
        mock::json(200, &json!({"status": "ok"})),
    ]);

    assert_eq!(client.ping().await.unwrap(), json!({"pong": true}));
    assert_eq!(client.status().await.unwrap(), json!({"status": "ok"}));

    let requests = client.executor().connector().client().captured_requests();
    assert_eq!(requests[0].url.as_str(), "https://testnet.xrpl.sale/api/ping");
    assert_eq!(requests[1].url.as_str(), "https://testnet.xrpl.sale/api/status");
}

#[test]
fn webhook_service_uses_configured_secret() {
    let client = client(vec![]);
    let payload = br#"{"id":"evt_1"}"#;

    let valid = client
        .webhooks()
        .verify_signature(payload, &sign(payload, "whsec_facade"), None)
        .unwrap();

    assert!(valid);
    assert!(client.verifier().has_secret());
}

#[test]
fn from_api_key_targets_production() {
    let client = XrplSaleClient::from_api_key("sk_live").unwrap();

    assert_eq!(client.config().environment(), Environment::Production);
    assert_eq!(client.executor().base_url(), PRODUCTION_BASE_URL);
    assert!(!client.verifier().has_secret());
}

#[test]
fn from_api_key_rejects_empty_key() {
    assert!(matches!(
        XrplSaleClient::from_api_key(""),
        Err(ClientConfigError::MissingApiKey)
    ));
}

#[tokio::test]
async fn close_closes_executor_session() {
    let client = client(vec![mock::json(200, &json!({}))]);
    client.ping().await.unwrap();

    client.close().await;

    assert!(!client.executor().is_open().await);
}

#[tokio::test]
async fn end_to_end_over_reqwest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/proj_404"))
        .and(header("authorization", "Bearer sk_e2e"))
        .and(header("user-agent", USER_AGENT_VALUE))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Project not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new("sk_e2e").unwrap();
    let executor = RequestExecutor::new(&config)
        .unwrap()
        .with_base_url(format!("{}/api", server.uri()));
    let client = XrplSaleClient::with_executor(config, executor);

    let error = client.projects().get("proj_404").await.unwrap_err();

    assert!(matches!(error, ApiError::NotFound { .. }));
    assert_eq!(error.to_string(), "[404] Project not found");
}
