use auth_api::CancellationSignal;
use token_store::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::state::AuthState;
use crate::transport::AuthTransport;

/// Durable key holding the prefixed bearer string.
pub const TOKEN_KEY: &str = "token";
pub const BEARER_PREFIX: &str = "Bearer ";

/// Owner of the session's bearer credential.
///
/// Every mutation takes `&mut self`, so an in-flight exchange or validation can
/// never interleave with another state change. Storage is only ever touched
/// through this type.
pub struct TokenLifecycle<T, S> {
    transport: T,
    storage: S,
    state: AuthState,
}

impl<T, S> TokenLifecycle<T, S>
where
    T: AuthTransport,
    S: KeyValueStore,
{
    /// Restores the persisted token, unverified.
    pub fn load(transport: T, storage: S) -> Result<Self, AuthError> {
        let token = storage.get(TOKEN_KEY)?.unwrap_or_default();
        if !token.is_empty() {
            debug!("restored persisted token; awaiting validation");
        }

        Ok(Self {
            transport,
            storage,
            state: AuthState::unverified(token),
        })
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.state.is_valid()
    }

    #[must_use]
    pub fn auth_token(&self) -> &str {
        self.state.token()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The single path that changes token and validity together.
    ///
    /// A non-empty raw token logs in and persists `Bearer <raw>`; anything else
    /// logs out and removes the key. In-memory state is applied even when the
    /// storage write fails.
    pub fn set_token(&mut self, raw: Option<&str>) -> Result<(), AuthError> {
        let persisted = match raw.filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                self.state = AuthState::authenticated(format!("{BEARER_PREFIX}{raw}"));
                self.storage.set(TOKEN_KEY, self.state.token())
            }
            None => {
                self.state = AuthState::default();
                self.storage.remove(TOKEN_KEY)
            }
        };

        persisted.map_err(|error| {
            warn!(%error, "failed to persist token change");
            AuthError::from(error)
        })
    }

    pub fn set_validity(&mut self, valid: bool) {
        self.state.set_valid(valid);
    }

    pub async fn exchange_code(&mut self, code: &str) -> Result<(), AuthError> {
        self.exchange_code_with(code, None).await
    }

    /// Exchanges `code` for a token. On failure the state is left untouched and
    /// the error is returned.
    pub async fn exchange_code_with(
        &mut self,
        code: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), AuthError> {
        match self.transport.exchange_code(code, cancellation).await {
            Ok(token) => {
                info!("authorization code exchanged");
                self.set_token(Some(&token))
            }
            Err(error) if error.is_cancelled() => {
                debug!("code exchange cancelled");
                Err(AuthError::Cancelled)
            }
            Err(error) => {
                warn!(%error, "authorization code exchange failed");
                Err(AuthError::Exchange(error))
            }
        }
    }

    /// Validates the current token. Any failure forces a full logout.
    pub async fn check_token(&mut self) -> bool {
        matches!(self.check_token_with(None).await, Ok(true))
    }

    /// Like [`Self::check_token`], but a cancelled check returns
    /// [`AuthError::Cancelled`] and leaves the state unchanged. If the forced
    /// logout cannot clear the persisted key, the in-memory logout still holds
    /// and [`AuthError::Storage`] is returned.
    pub async fn check_token_with(
        &mut self,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<bool, AuthError> {
        let token = self.state.token().to_owned();
        match self.transport.check_health(&token, cancellation).await {
            Ok(()) => {
                self.set_validity(true);
                Ok(true)
            }
            Err(error) if error.is_cancelled() => {
                debug!("token validation cancelled");
                Err(AuthError::Cancelled)
            }
            Err(error) => {
                warn!(%error, "token validation failed; logging out");
                self.set_token(None)?;
                Ok(false)
            }
        }
    }

    /// Logs out and hands back the collaborators.
    pub fn into_parts(mut self) -> (T, S) {
        let _ = self.set_token(None);
        (self.transport, self.storage)
    }
}
