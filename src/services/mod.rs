//! Endpoint mappers for each API resource.
//!
//! Services borrow a [`RequestExecutor`](crate::client::RequestExecutor)
//! and translate typed parameters into requests. They hold no state of
//! their own; obtain them from [`XrplSaleClient`](crate::client::XrplSaleClient).

mod analytics;
mod auth;
mod investments;
mod projects;
mod webhooks;


pub use analytics::{AnalyticsService, DEFAULT_TRENDS_PERIOD};
pub use auth::AuthService;
pub use investments::InvestmentsService;
pub use projects::ProjectsService;
pub use webhooks::WebhooksService;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{ApiError, ApiResult};

/// Decodes an API response into a typed record.
fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(ApiError::Decode)
}

/// Encodes a request body.
fn encode<T: Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(format!("Unserializable body: {e}")))
}

/// Checks that an identifier can be used as a single path segment.
fn segment(id: &str) -> ApiResult<&str> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidRequest(format!(
            "'{id}' is not a valid identifier"
        )));
    }
    Ok(id)
}
