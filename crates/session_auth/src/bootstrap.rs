use std::time::Duration;

use auth_api::{await_or_cancel, CancellationSignal};
use tokio::sync::OnceCell;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::error::OAuthError;
use crate::provider::IdentityProvider;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_LOAD_DEADLINE: Duration = Duration::from_secs(10);

/// One-time injection of the identity SDK.
///
/// A successful load is remembered for the lifetime of this value; a failed
/// load may be retried by the next caller.
#[derive(Debug)]
pub struct SdkBootstrap {
    settle_delay: Duration,
    load_deadline: Duration,
    loaded: OnceCell<()>,
}

impl Default for SdkBootstrap {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY, DEFAULT_LOAD_DEADLINE)
    }
}

impl SdkBootstrap {
    pub fn new(settle_delay: Duration, load_deadline: Duration) -> Self {
        Self {
            settle_delay,
            load_deadline,
            loaded: OnceCell::new(),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Resolves once the SDK is ready to be polled for its auth module.
    ///
    /// An already-present script resolves immediately. Otherwise the script is
    /// loaded and the settle delay elapses before this returns.
    pub async fn ensure_loaded<P>(
        &self,
        provider: &P,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), OAuthError>
    where
        P: IdentityProvider,
    {
        self.loaded
            .get_or_try_init(|| self.load(provider, cancellation))
            .await
            .map(|_| ())
    }

    async fn load<P>(
        &self,
        provider: &P,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), OAuthError>
    where
        P: IdentityProvider,
    {
        if provider.script_present() {
            debug!("identity SDK already present");
            return Ok(());
        }

        let loading = timeout(self.load_deadline, provider.load_script());
        match await_or_cancel(loading, cancellation).await {
            Err(_) => return Err(OAuthError::Cancelled),
            Ok(Err(_)) => {
                return Err(OAuthError::SdkUnavailable {
                    reason: format!("script did not load within {:?}", self.load_deadline),
                })
            }
            Ok(Ok(Err(reason))) => return Err(OAuthError::SdkUnavailable { reason }),
            Ok(Ok(Ok(()))) => {}
        }

        info!(settle_ms = self.settle_delay.as_millis() as u64, "identity SDK loaded");
        await_or_cancel(sleep(self.settle_delay), cancellation)
            .await
            .map_err(|_| OAuthError::Cancelled)
    }
}
