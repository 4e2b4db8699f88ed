//! Request pacing for rate-limited providers.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// Default minimum interval between two provider requests.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(4);

/// How an adapter paces and retries its provider requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Minimum interval between the start of two consecutive requests. Also
    /// the wait before retrying a rate-limited request.
    pub cooldown: Duration,
    /// Retries allowed for a rate-limited tier before giving up.
    pub rate_limit_retries: u32,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            rate_limit_retries: 1,
        }
    }
}

/// Serializes requests so that consecutive ones start at least
/// `policy.cooldown` apart.
#[derive(Debug)]
pub(crate) struct Pacer {
    policy: PacingPolicy,
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub(crate) fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Waits until the cool-down since the previous request has elapsed and
    /// claims the next request slot.
    pub(crate) async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.policy.cooldown;
            if ready_at > Instant::now() {
                debug!(
                    cooldown_ms = self.policy.cooldown.as_millis(),
                    "waiting for provider cool-down"
                );
                sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
