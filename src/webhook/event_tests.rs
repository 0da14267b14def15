//! Tests for the webhook event model.

use super::{WebhookEvent, WebhookEventType};

#[test]
fn event_type_serializes_to_dotted_name() {
    for event_type in WebhookEventType::ALL {
        let json = serde_json::to_value(event_type).unwrap();
        assert_eq!(json, event_type.as_str());
        assert_eq!(event_type.to_string(), event_type.as_str());
    }
}

#[test]
fn event_type_field_is_named_type() {
    let event: WebhookEvent = serde_json::from_value(serde_json::json!({
        "id": "evt_9",
        "type": "tokens.distributed",
        "data": {"amount": "1000"},
        "timestamp": "2025-06-30T08:15:00Z",
        "version": "2.0"
    }))
    .unwrap();

    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "tokens.distributed");
    assert!(json.get("event_type").is_none());
}

#[test]
fn timestamp_with_offset_is_normalized_to_utc() {
    let event: WebhookEvent = serde_json::from_value(serde_json::json!({
        "id": "evt_1",
        "type": "project.launched",
        "data": {},
        "timestamp": "2025-06-30T10:15:00+02:00",
        "version": "1.0"
    }))
    .unwrap();

    assert_eq!(event.timestamp.to_rfc3339(), "2025-06-30T08:15:00+00:00");
}

mod timestamp_forms {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::webhook::{WebhookError, WebhookVerifier};

    fn parse(timestamp: serde_json::Value) -> Result<WebhookEvent, WebhookError> {
        let payload = serde_json::json!({
            "id": "evt_2",
            "type": "investment.confirmed",
            "data": {},
            "timestamp": timestamp,
            "version": "1.0"
        });
        WebhookVerifier::without_secret().parse_webhook(payload.to_string())
    }

    fn new_year() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn naive_iso_string_is_read_as_utc() {
        let event = parse("2025-01-01T00:00:00".into()).unwrap();

        assert_eq!(event.timestamp, new_year());
    }

    #[test]
    fn naive_iso_string_with_fraction() {
        let event = parse("2025-01-01T00:00:00.250".into()).unwrap();

        assert_eq!(event.timestamp.timestamp_millis(), new_year().timestamp_millis() + 250);
    }

    #[test]
    fn integer_epoch_seconds() {
        let event = parse(1_735_689_600.into()).unwrap();

        assert_eq!(event.timestamp, new_year());
    }

    #[test]
    fn float_epoch_seconds() {
        let event = parse(serde_json::json!(1_735_689_600.5)).unwrap();

        assert_eq!(event.timestamp.timestamp_millis(), new_year().timestamp_millis() + 500);
    }

    #[test]
    fn non_date_string_is_rejected() {
        let err = parse("yesterday".into()).unwrap_err();

        assert!(matches!(err, WebhookError::InvalidPayload(_)));
    }

    #[test]
    fn boolean_is_rejected() {
        assert!(parse(true.into()).is_err());
    }
}
