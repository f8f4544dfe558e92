use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CAREVOICE_BASE_URL, DEFAULT_CAREVOICE_TIMEOUT_SECS,
};

use serde::Deserialize;

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Credentials and endpoint for the CareVoice open API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CareVoiceConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Account group new upstream accounts are provisioned into
    pub group: Option<String>,
    /// Per-request timeout for upstream calls
    pub timeout_secs: u64,
}

impl Default for CareVoiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_CAREVOICE_BASE_URL),
            api_key: None,
            client_id: None,
            client_secret: None,
            group: None,
            timeout_secs: DEFAULT_CAREVOICE_TIMEOUT_SECS,
        }
    }
}

impl CareVoiceConfig {
    /// Names of the credential fields that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("carevoice.api_key", &self.api_key),
            ("carevoice.client_id", &self.client_id),
            ("carevoice.client_secret", &self.client_secret),
            ("carevoice.group", &self.group),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// `require_credentials` is set in production, where a half-configured
    /// upstream would fail every login.
    pub fn validate(&self, require_credentials: bool) -> ConfigErrorResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::carevoice(format!(
                "carevoice.api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::carevoice(format!(
                "carevoice.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if require_credentials {
            let missing = self.missing_credentials();
            if !missing.is_empty() {
                return Err(ConfigError::carevoice(format!(
                    "missing required settings: {}",
                    missing.join(", ")
                )));
            }
        }

        Ok(())
    }
}
