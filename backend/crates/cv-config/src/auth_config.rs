use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_JWT_EXPIRES_IN, DEFAULT_JWT_SECRET,
    MIN_JWT_SECRET_LENGTH,
};

use std::time::Duration;

use serde::Deserialize;

/// Session token signing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for locally issued session tokens
    pub jwt_secret: String,
    /// Session lifetime in humantime notation ("24h", "30m", "7days")
    pub jwt_expires_in: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_JWT_SECRET),
            jwt_expires_in: String::from(DEFAULT_JWT_EXPIRES_IN),
        }
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Parsed session lifetime.
    pub fn session_ttl(&self) -> ConfigErrorResult<Duration> {
        let ttl = humantime::parse_duration(self.jwt_expires_in.trim()).map_err(|e| {
            ConfigError::auth(format!(
                "auth.jwt_expires_in '{}' is not a valid duration: {}",
                self.jwt_expires_in, e
            ))
        })?;

        if ttl.is_zero() {
            return Err(ConfigError::auth("auth.jwt_expires_in must be greater than zero"));
        }

        Ok(ttl)
    }

    pub fn validate(&self, production: bool) -> ConfigErrorResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::auth("auth.jwt_secret cannot be empty"));
        }

        if production {
            if self.uses_default_secret() {
                return Err(ConfigError::auth(
                    "auth.jwt_secret must be changed from the default in production",
                ));
            }
            if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters in production",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
        }

        self.session_ttl()?;

        Ok(())
    }
}
