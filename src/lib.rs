//! Client session state for a real-time chat app.
//!
//! The workspace splits into:
//! - [`session_timeline`]: connection tracking, identity resolution, and the
//!   coalescing message timeline.
//! - [`token_store`]: durable key/value storage for the bearer token.
//! - [`auth_api`]: HTTP calls for code exchange and token validation.
//! - [`session_auth`]: the token lifecycle and the OAuth authorization flow.
//!
//! This crate wires them into one [`SessionContext`] per client session and
//! carries the environment configuration and tracing bootstrap.

pub mod config;
pub mod context;
pub mod logging;

pub use auth_api;
pub use session_auth;
pub use session_timeline;
pub use token_store;

pub use config::EnvConfig;
pub use context::{ContextError, SessionContext};
