use auth_api::{await_or_cancel, CancellationSignal};
use token_store::KeyValueStore;
use tracing::{debug, info, warn};

use crate::bootstrap::SdkBootstrap;
use crate::error::{AuthError, OAuthError};
use crate::lifecycle::TokenLifecycle;
use crate::provider::{IdentityProvider, OAuthConfig, PromptMode};
use crate::transport::AuthTransport;
use crate::wait::BoundedWait;

/// Where the authorization state machine currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthorizationPhase {
    #[default]
    Idle,
    SilentAttempt,
    InteractiveAttempt {
        silent_rejection: String,
    },
    Authorized {
        code: String,
    },
    Denied {
        silent: String,
        interactive: String,
    },
}

impl AuthorizationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authorized { .. } | Self::Denied { .. })
    }
}

/// Authorization-code flow against an [`IdentityProvider`].
pub struct OAuthFlow {
    config: OAuthConfig,
    bootstrap: SdkBootstrap,
    wait: BoundedWait,
    phase: AuthorizationPhase,
}

impl OAuthFlow {
    pub fn new(config: OAuthConfig) -> Self {
        if config.client_id.trim().is_empty() {
            warn!("OAuth client_id is empty; authorization requests will likely be rejected");
        }
        Self {
            config,
            bootstrap: SdkBootstrap::default(),
            wait: BoundedWait::default(),
            phase: AuthorizationPhase::Idle,
        }
    }

    pub fn with_bootstrap(mut self, bootstrap: SdkBootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_wait(mut self, wait: BoundedWait) -> Self {
        self.wait = wait;
        self
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    pub fn bootstrap(&self) -> &SdkBootstrap {
        &self.bootstrap
    }

    pub fn phase(&self) -> &AuthorizationPhase {
        &self.phase
    }

    /// Loads the SDK and waits for its authorization module.
    pub async fn prepare<P>(
        &self,
        provider: &P,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), OAuthError>
    where
        P: IdentityProvider,
    {
        self.bootstrap.ensure_loaded(provider, cancellation).await?;
        if provider.auth_module_ready() {
            return Ok(());
        }

        debug!(
            interval_ms = self.wait.interval().as_millis() as u64,
            max_attempts = self.wait.max_attempts(),
            "waiting for identity SDK auth module"
        );
        self.wait
            .until(|| provider.auth_module_ready().then_some(()), cancellation)
            .await
            .map_err(|error| {
                warn!(%error, "identity SDK auth module never became available");
                OAuthError::from(error)
            })
    }

    /// Runs the silent attempt, then one interactive attempt, and returns the
    /// authorization code.
    ///
    /// An empty code counts as a rejection.
    pub async fn authorize<P>(
        &mut self,
        provider: &P,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<String, OAuthError>
    where
        P: IdentityProvider,
    {
        self.phase = AuthorizationPhase::SilentAttempt;
        let silent = match self.attempt(provider, PromptMode::None, cancellation).await? {
            Ok(code) => return Ok(self.authorized(code)),
            Err(reason) => reason,
        };

        debug!(reason = %silent, "silent authorization rejected; prompting");
        self.phase = AuthorizationPhase::InteractiveAttempt {
            silent_rejection: silent.clone(),
        };
        let interactive = match self.attempt(provider, PromptMode::Default, cancellation).await? {
            Ok(code) => return Ok(self.authorized(code)),
            Err(reason) => reason,
        };

        warn!(%silent, %interactive, "authorization denied");
        self.phase = AuthorizationPhase::Denied {
            silent: silent.clone(),
            interactive: interactive.clone(),
        };
        Err(OAuthError::AuthorizationDenied {
            silent,
            interactive,
        })
    }

    /// Prepares the SDK, authorizes, and hands the code to `lifecycle`.
    pub async fn run<P, T, S>(
        &mut self,
        provider: &P,
        lifecycle: &mut TokenLifecycle<T, S>,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), OAuthError>
    where
        P: IdentityProvider,
        T: AuthTransport,
        S: KeyValueStore,
    {
        self.prepare(provider, cancellation).await?;
        let code = self.authorize(provider, cancellation).await?;
        match lifecycle.exchange_code_with(&code, cancellation).await {
            Ok(()) => Ok(()),
            Err(AuthError::Cancelled) => Err(OAuthError::Cancelled),
            Err(error) => Err(OAuthError::Session(error)),
        }
    }

    /// A cancelled attempt returns the flow to `Idle`.
    async fn attempt<P>(
        &mut self,
        provider: &P,
        prompt: PromptMode,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Result<String, String>, OAuthError>
    where
        P: IdentityProvider,
    {
        let request = self.config.request(prompt);
        let Ok(outcome) = await_or_cancel(provider.authorize(&request), cancellation).await
        else {
            debug!(?prompt, "authorization attempt cancelled");
            self.phase = AuthorizationPhase::Idle;
            return Err(OAuthError::Cancelled);
        };

        Ok(match outcome {
            Ok(response) if response.code.is_empty() => {
                Err("provider returned an empty authorization code".to_owned())
            }
            Ok(response) => Ok(response.code),
            Err(reason) => Err(reason),
        })
    }

    fn authorized(&mut self, code: String) -> String {
        info!(phase = ?self.phase, "authorization granted");
        self.phase = AuthorizationPhase::Authorized { code: code.clone() };
        code
    }
}
