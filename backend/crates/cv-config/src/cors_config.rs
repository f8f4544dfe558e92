use crate::{ConfigError, ConfigErrorResult, DEFAULT_CORS_ORIGINS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl CorsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(bad) = self
            .origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::config(format!(
                "cors.origins entries must start with http:// or https://, got '{}'",
                bad
            )));
        }

        Ok(())
    }
}
