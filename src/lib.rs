//! XRPL.Sale SDK
//!
//! A client library for the XRPL.Sale token sale platform: typed access
//! to the REST API with retry on network failures, and verification of
//! signed webhook deliveries.

pub mod client;
pub mod config;
pub mod http;
pub mod models;
pub mod services;
pub mod time;
pub mod webhook;

pub use client::{ApiError, ApiResult, ClientConfig, Environment, XrplSaleClient};
pub use webhook::{WebhookError, WebhookEvent, WebhookVerifier};
