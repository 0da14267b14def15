//! Tests for `ApiError`.

use super::ApiError;
use crate::http::HttpError;
use http::StatusCode;
use serde_json::json;

mod from_response {
    use super::*;

    #[test]
    fn maps_each_known_status() {
        let cases = [
            (400, "Validation"),
            (401, "Authentication"),
            (403, "Authorization"),
            (404, "NotFound"),
            (429, "RateLimit"),
            (500, "Server"),
        ];

        for (code, variant) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let error = ApiError::from_response(status, json!({"message": "boom"}));
            assert!(format!("{error:?}").starts_with(variant), "{code} -> {error:?}");
            assert_eq!(error.status_code(), Some(code));
        }
    }

    #[test]
    fn other_statuses_are_generic() {
        let error = ApiError::from_response(StatusCode::SERVICE_UNAVAILABLE, json!({}));

        assert!(matches!(error, ApiError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(error.status_code(), Some(503));
    }

    #[test]
    fn message_comes_from_body() {
        let body = json!({"message": "Project not found", "code": "NOT_FOUND"});

        let error = ApiError::from_response(StatusCode::NOT_FOUND, body.clone());

        assert_eq!(error.message(), "Project not found");
        assert_eq!(error.details(), Some(&body));
        assert_eq!(error.to_string(), "[404] Project not found");
    }

    #[test]
    fn missing_message_falls_back_to_status() {
        let error = ApiError::from_response(StatusCode::FORBIDDEN, json!({"error": "nope"}));

        assert_eq!(error.message(), "HTTP 403");
        assert_eq!(error.to_string(), "[403] HTTP 403");
    }

    #[test]
    fn non_string_message_falls_back_to_status() {
        let error = ApiError::from_response(StatusCode::CONFLICT, json!({"message": 42}));

        assert_eq!(error.message(), "HTTP 409");
        assert_eq!(error.to_string(), "[409] HTTP 409");
    }

    #[test]
    fn unauthorized_is_always_authentication() {
        for body in [json!({}), json!({"message": "expired"}), json!([1, 2])] {
            let error = ApiError::from_response(StatusCode::UNAUTHORIZED, body);
            assert!(matches!(error, ApiError::Authentication { .. }));
        }
    }
}

mod other_kinds {
    use super::*;
    use std::error::Error;

    #[test]
    fn network_error_has_no_status_and_keeps_cause() {
        let error = ApiError::Network {
            attempts: 4,
            source: HttpError::Timeout,
        };

        assert!(error.is_network());
        assert_eq!(error.status_code(), None);
        assert_eq!(error.details(), None);
        assert!(error.to_string().starts_with("Network error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn invalid_json_reports_status() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = ApiError::InvalidJson {
            status: StatusCode::BAD_GATEWAY,
            source,
        };

        assert_eq!(error.status_code(), Some(502));
        assert!(!error.is_network());
    }

    #[test]
    fn cancelled_message() {
        assert_eq!(ApiError::Cancelled.message(), "Request cancelled");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<ApiError>();
    }
}
