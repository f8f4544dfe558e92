use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ENVIRONMENT, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT,
    PRODUCTION_ENVIRONMENT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment environment name ("development", "production", ...)
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            environment: String::from(DEFAULT_ENVIRONMENT),
        }
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION_ENVIRONMENT)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.environment.trim().is_empty() {
            return Err(ConfigError::config("server.environment cannot be empty"));
        }

        Ok(())
    }
}
