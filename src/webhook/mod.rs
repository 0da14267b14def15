//! Inbound webhook handling.
//!
//! This module provides:
//! - Signature verification and event parsing ([`WebhookVerifier`])
//! - The typed event model ([`WebhookEvent`], [`WebhookEventType`])
//! - A framework-neutral request adapter ([`WebhookReceiver`])

mod error;
mod event;
mod receiver;
mod signature;

#[cfg(test)]
mod event_tests;
#[cfg(test)]
mod receiver_tests;

pub use error::WebhookError;
pub use event::{WebhookEvent, WebhookEventType};
pub use receiver::{SIGNATURE_HEADER, WebhookReceiver, WebhookRejection};
pub use signature::{SIGNATURE_PREFIX, WebhookVerifier, sign};
