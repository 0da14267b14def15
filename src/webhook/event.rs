//! Webhook event model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kinds of event the platform delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "project.created")]
    ProjectCreated,
    #[serde(rename = "project.updated")]
    ProjectUpdated,
    #[serde(rename = "project.launched")]
    ProjectLaunched,
    #[serde(rename = "project.completed")]
    ProjectCompleted,
    #[serde(rename = "investment.created")]
    InvestmentCreated,
    #[serde(rename = "investment.confirmed")]
    InvestmentConfirmed,
    #[serde(rename = "investment.failed")]
    InvestmentFailed,
    #[serde(rename = "tier.completed")]
    TierCompleted,
    #[serde(rename = "tokens.distributed")]
    TokensDistributed,
}

impl WebhookEventType {
    /// Every known event type.
    pub const ALL: [Self; 9] = [
        Self::ProjectCreated,
        Self::ProjectUpdated,
        Self::ProjectLaunched,
        Self::ProjectCompleted,
        Self::InvestmentCreated,
        Self::InvestmentConfirmed,
        Self::InvestmentFailed,
        Self::TierCompleted,
        Self::TokensDistributed,
    ];

    /// Dotted wire name, e.g. `project.created`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectCreated => "project.created",
            Self::ProjectUpdated => "project.updated",
            Self::ProjectLaunched => "project.launched",
            Self::ProjectCompleted => "project.completed",
            Self::InvestmentCreated => "investment.created",
            Self::InvestmentConfirmed => "investment.confirmed",
            Self::InvestmentFailed => "investment.failed",
            Self::TierCompleted => "tier.completed",
            Self::TokensDistributed => "tokens.distributed",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed webhook delivery.
///
/// Obtained from [`WebhookVerifier::parse_webhook`](super::WebhookVerifier::parse_webhook)
/// or [`WebhookReceiver::receive`](super::WebhookReceiver::receive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Unique delivery id
    pub id: String,
    /// Event kind
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    /// Event-specific payload
    pub data: Map<String, Value>,
    /// When the event occurred
    #[serde(deserialize_with = "crate::models::serde_util::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    /// Payload schema version
    pub version: String,
}
