//! Session authentication lifecycle.
//!
//! [`TokenLifecycle`] owns the bearer credential: it loads the persisted
//! `"token"` key at start-up (never trusting it until validated), applies
//! exchange results, and forces a logout whenever validation fails.
//!
//! [`OAuthFlow`] drives the external identity SDK: a bounded bootstrap and
//! readiness poll, then a silent authorization attempt followed by one
//! interactive attempt, and finally the code handoff to the lifecycle manager.

mod bootstrap;
mod error;
mod flow;
mod lifecycle;
mod provider;
mod state;
mod transport;
mod wait;

pub use auth_api::CancellationSignal;
pub use bootstrap::{SdkBootstrap, DEFAULT_LOAD_DEADLINE, DEFAULT_SETTLE_DELAY};
pub use error::{AuthError, OAuthError};
pub use flow::{AuthorizationPhase, OAuthFlow};
pub use lifecycle::{TokenLifecycle, BEARER_PREFIX, TOKEN_KEY};
pub use provider::{
    AuthorizationRequest, AuthorizationResponse, IdentityProvider, OAuthConfig, PromptMode,
    DEFAULT_DISCOVERY_DOCS, DEFAULT_SCOPE,
};
pub use state::AuthState;
pub use transport::AuthTransport;
pub use wait::{
    BoundedWait, WaitError, DEFAULT_DEADLINE, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
