//! HTTP transport for the chat API's authentication endpoints.
//!
//! This crate owns request building and response parsing for the code exchange
//! (`POST /auth/google`) and token validation (`GET /api/health`) calls. It
//! holds no session state; callers decide what a failure means.
//!
//! Every call is a single attempt. Cancellation is cooperative through a
//! shared [`CancellationSignal`].

pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod url;

pub use cancel::{await_or_cancel, is_cancelled, CancellationSignal};
pub use client::{AuthApiClient, CodeExchangeRequest, TokenResponse};
pub use config::AuthApiConfig;
pub use error::AuthApiError;
pub use reqwest::StatusCode;
pub use crate::url::{endpoint_url, EXCHANGE_PATH, HEALTH_PATH};
