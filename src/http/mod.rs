//! Transport layer for talking to the XRPL.Sale API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) and session creation ([`Connector`])
//! - Production implementations ([`ReqwestClient`], [`ReqwestConnector`])
//! - Retry policy configuration ([`RetryPolicy`])

mod client;
mod error;
mod retry;
mod transport;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
mod transport_tests;

pub use client::{ReqwestClient, ReqwestConnector};
pub use error::HttpError;
pub use retry::{IsRetryable, RetryPolicy};
pub use transport::{Connector, HttpClient, HttpRequest, HttpResponse, SessionSettings};
