use std::time::Duration;

use auth_api::{is_cancelled, CancellationSignal};
use thiserror::Error;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("condition not met after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("condition not met within {0:?}")]
    DeadlineElapsed(Duration),

    #[error("wait was cancelled")]
    Cancelled,
}

/// Fixed-interval poll with both an attempt cap and an overall deadline.
///
/// Each attempt sleeps one interval before checking. Dropping the returned
/// future also stops the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedWait {
    interval: Duration,
    max_attempts: u32,
    deadline: Duration,
}

impl Default for BoundedWait {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

impl BoundedWait {
    pub fn new(interval: Duration, max_attempts: u32, deadline: Duration) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
            deadline,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub async fn until<T, F>(
        &self,
        mut check: F,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<T, WaitError>
    where
        F: FnMut() -> Option<T>,
    {
        let deadline = Instant::now() + self.deadline;

        for attempt in 1..=self.max_attempts {
            if is_cancelled(cancellation) {
                return Err(WaitError::Cancelled);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(WaitError::DeadlineElapsed(self.deadline));
            }

            sleep_until((now + self.interval).min(deadline)).await;
            if is_cancelled(cancellation) {
                return Err(WaitError::Cancelled);
            }

            if let Some(ready) = check() {
                trace!(attempt, "bounded wait satisfied");
                return Ok(ready);
            }
        }

        Err(WaitError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
