use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Rate limit constraints
pub const MIN_RATE_LIMIT_REQUESTS: u32 = 1;
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 10000;
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

pub const MIN_RATE_LIMIT_WINDOW_MS: u64 = 1000;
pub const MAX_RATE_LIMIT_WINDOW_MS: u64 = 86_400_000;
pub const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 900_000;

/// Rate limiting settings.
/// Applied per client to every `/api` route.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Window duration in milliseconds
    pub window_ms: u64,
    /// Key clients by the first `X-Forwarded-For` entry instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_ms: DEFAULT_RATE_LIMIT_WINDOW_MS,
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_requests < MIN_RATE_LIMIT_REQUESTS
            || self.max_requests > MAX_RATE_LIMIT_REQUESTS
        {
            return Err(ConfigError::config(format!(
                "rate_limit.max_requests must be {}-{}, got {}",
                MIN_RATE_LIMIT_REQUESTS, MAX_RATE_LIMIT_REQUESTS, self.max_requests
            )));
        }

        if self.window_ms < MIN_RATE_LIMIT_WINDOW_MS || self.window_ms > MAX_RATE_LIMIT_WINDOW_MS {
            return Err(ConfigError::config(format!(
                "rate_limit.window_ms must be {}-{}, got {}",
                MIN_RATE_LIMIT_WINDOW_MS, MAX_RATE_LIMIT_WINDOW_MS, self.window_ms
            )));
        }

        Ok(())
    }
}
