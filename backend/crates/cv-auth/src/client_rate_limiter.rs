use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
};

const MIN_REPLENISH_PERIOD: Duration = Duration::from_millis(1);

/// Rate limiter keyed by client identity (usually the remote address).
///
/// A client may burst up to `max_requests` and regains one request every
/// `window / max_requests`, so a sustained client is held to the configured
/// rate over any full window.
pub struct ClientRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    config: RateLimitConfig,
}

impl ClientRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = (config.window() / burst.get()).max(MIN_REPLENISH_PERIOD);

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check if a request from `key` is allowed, returns error if rate limited
    #[track_caller]
    pub fn check(&self, key: &str) -> AuthErrorResult<()> {
        self.limiter
            .check_key(&key.to_string())
            .map_err(|not_until| {
                let wait = not_until.wait_time_from(self.limiter.clock().now());
                AuthError::RateLimitExceeded {
                    limit: self.config.max_requests,
                    window_ms: self.config.window_ms,
                    retry_after_secs: wait.as_secs().max(1),
                    location: ErrorLocation::from(Location::caller()),
                }
            })
    }

    /// Drop state for clients whose buckets have fully refilled
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}
