//! Per-session root object tying the timeline to the credential lifecycle.

use std::env;

use auth_api::{AuthApiClient, AuthApiError, CancellationSignal};
use session_auth::{
    AuthError, AuthState, AuthTransport, IdentityProvider, OAuthError, OAuthFlow, TokenLifecycle,
};
use session_timeline::{
    AuthorRef, ConnectionState, InboundEvent, IngestOutcome, SocketEvent, Timeline,
    TimelineError, TimelineSession,
};
use thiserror::Error;
use token_store::{store_file, FileStore, KeyValueStore, StoreError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EnvConfig;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to build auth API client: {0}")]
    Client(#[source] AuthApiError),

    #[error("failed to resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Everything one client session owns.
///
/// Constructed once at start-up and consumed by [`SessionContext::logout`].
pub struct SessionContext<T = AuthApiClient, S = FileStore> {
    session_id: Uuid,
    timeline: TimelineSession,
    auth: TokenLifecycle<T, S>,
}

impl SessionContext {
    /// Production wiring: HTTP transport plus the on-disk store.
    ///
    /// Without an explicit store path the store lives under the current
    /// working directory.
    pub fn from_config(config: &EnvConfig) -> Result<Self, ContextError> {
        let transport = AuthApiClient::new(config.auth_api()).map_err(ContextError::Client)?;
        let path = match &config.store_path {
            Some(path) => path.clone(),
            None => store_file(&env::current_dir().map_err(ContextError::WorkingDir)?),
        };
        debug!(path = %path.display(), "opening token store");
        let storage = FileStore::open(&path)?;
        Ok(Self::new(transport, storage)?)
    }
}

impl<T, S> SessionContext<T, S>
where
    T: AuthTransport,
    S: KeyValueStore,
{
    pub fn new(transport: T, storage: S) -> Result<Self, AuthError> {
        let auth = TokenLifecycle::load(transport, storage)?;
        let session_id = Uuid::new_v4();
        info!(%session_id, restored = auth.state().has_token(), "session started");

        Ok(Self {
            session_id,
            timeline: TimelineSession::new(),
            auth,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn dispatch(&mut self, event: SocketEvent) {
        self.timeline.dispatch(event);
    }

    pub fn on_open(&mut self) {
        self.dispatch(SocketEvent::Open);
    }

    pub fn on_connect(&mut self) {
        self.dispatch(SocketEvent::Connect);
    }

    pub fn on_error(&mut self, error: impl Into<String>) {
        self.dispatch(SocketEvent::Error(error.into()));
    }

    pub fn on_close(&mut self) {
        self.dispatch(SocketEvent::Close);
    }

    pub fn ingest(&mut self, event: InboundEvent) -> &Timeline {
        self.timeline.ingest(event)
    }

    pub fn ingest_json(&mut self, raw: &str) -> Result<IngestOutcome, TimelineError> {
        self.timeline.ingest_json(raw)
    }

    pub fn timeline(&self) -> &Timeline {
        self.timeline.timeline()
    }

    pub fn connection(&self) -> &ConnectionState {
        self.timeline.connection()
    }

    pub fn session_author(&self) -> Option<&AuthorRef> {
        self.timeline.session_author()
    }

    pub fn auth_state(&self) -> &AuthState {
        self.auth.state()
    }

    pub fn logged_in(&self) -> bool {
        self.auth.logged_in()
    }

    pub fn auth_token(&self) -> &str {
        self.auth.auth_token()
    }

    pub async fn request_token_exchange(&mut self, code: &str) -> Result<(), AuthError> {
        self.auth.exchange_code(code).await
    }

    pub async fn verify_token(&mut self) -> bool {
        self.auth.check_token().await
    }

    pub async fn verify_token_with(
        &mut self,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<bool, AuthError> {
        self.auth.check_token_with(cancellation).await
    }

    /// Runs the full OAuth flow and stores the resulting token.
    pub async fn sign_in<P>(
        &mut self,
        flow: &mut OAuthFlow,
        provider: &P,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), OAuthError>
    where
        P: IdentityProvider,
    {
        flow.run(provider, &mut self.auth, cancellation).await
    }

    /// Clears the credential and ends the session.
    pub fn logout(self) -> (T, S) {
        info!(session_id = %self.session_id, "session ended");
        self.auth.into_parts()
    }
}
