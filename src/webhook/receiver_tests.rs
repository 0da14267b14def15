//! Tests for `WebhookReceiver`.

use super::{SIGNATURE_HEADER, WebhookEventType, WebhookReceiver, WebhookRejection, WebhookVerifier, sign};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

const SECRET: &str = "whsec_receiver";
const BODY: &[u8] = br#"{"id":"evt_7","type":"investment.created","data":{"amount_xrp":"250"},"timestamp":"2025-02-14T09:30:00Z","version":"1.0"}"#;

fn signed_headers(body: &[u8], secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        SIGNATURE_HEADER,
        HeaderValue::from_str(&sign(body, secret)).unwrap(),
    );
    headers
}

fn receiver() -> WebhookReceiver {
    WebhookReceiver::new(WebhookVerifier::new(SECRET))
}

mod verified {
    use super::*;

    #[test]
    fn valid_request_yields_event() {
        let event = receiver().receive(&signed_headers(BODY, SECRET), BODY).unwrap();

        assert_eq!(event.id, "evt_7");
        assert_eq!(event.event_type, WebhookEventType::InvestmentCreated);
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-XRPL-Sale-Signature").unwrap(),
            HeaderValue::from_str(&sign(BODY, SECRET)).unwrap(),
        );

        assert!(receiver().receive(&headers, BODY).is_ok());
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let rejection = receiver().receive(&HeaderMap::new(), BODY).unwrap_err();

        assert!(matches!(rejection, WebhookRejection::MissingSignature));
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn wrong_signature_is_unauthorized() {
        let rejection = receiver()
            .receive(&signed_headers(BODY, "other_secret"), BODY)
            .unwrap_err();

        assert!(matches!(rejection, WebhookRejection::InvalidSignature));
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn signed_garbage_is_bad_request() {
        let body = b"not json";

        let rejection = receiver()
            .receive(&signed_headers(body, SECRET), body)
            .unwrap_err();

        assert!(matches!(rejection, WebhookRejection::BadPayload(_)));
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_secret_is_server_error() {
        let receiver = WebhookReceiver::new(WebhookVerifier::without_secret());

        let rejection = receiver
            .receive(&signed_headers(BODY, SECRET), BODY)
            .unwrap_err();

        assert!(matches!(rejection, WebhookRejection::Misconfigured(_)));
        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn secret_override_is_used() {
        let receiver =
            WebhookReceiver::new(WebhookVerifier::without_secret()).with_secret("override");

        assert!(receiver.receive(&signed_headers(BODY, "override"), BODY).is_ok());
    }
}

mod unverified {
    use super::*;

    #[test]
    fn skips_signature_check() {
        let receiver = WebhookReceiver::new(WebhookVerifier::without_secret()).without_verification();

        assert!(!receiver.verifies_signatures());
        assert!(receiver.receive(&HeaderMap::new(), BODY).is_ok());
    }

    #[test]
    fn still_rejects_bad_payload() {
        let receiver = receiver().without_verification();

        let rejection = receiver.receive(&HeaderMap::new(), b"{}").unwrap_err();

        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }
}

#[test]
fn debug_redacts_override_secret() {
    let debug = format!("{:?}", receiver().with_secret("hidden_override"));

    assert!(!debug.contains("hidden_override"));
    assert!(!debug.contains(SECRET));
}
