use crate::{
    AuthConfig, CareVoiceConfig, ConfigError, ConfigErrorResult, CorsConfig, LoggingConfig,
    RateLimitConfig, ServerConfig, StorageConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "CV_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".carevoice";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub carevoice: CareVoiceConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CV_CONFIG_DIR env var, else use ./.carevoice/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply environment variable overrides (PORT, CAREVOICE_*, JWT_*, ...)
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CV_CONFIG_DIR env var > ./.carevoice/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let production = self.server.is_production();

        self.server.validate()?;
        self.carevoice.validate(production)?;
        self.auth.validate(production)?;
        self.rate_limit.validate()?;
        self.cors.validate()?;
        self.storage.validate()?;

        Ok(())
    }

    /// Get absolute path to the SQLite user database.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.storage.database_path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} ({})",
            self.server.host, self.server.port, self.server.environment
        );
        info!(
            "  carevoice: {} (timeout {}s, api_key: {}, client_id: {}, group: {})",
            self.carevoice.api_base_url,
            self.carevoice.timeout_secs,
            Self::presence(&self.carevoice.api_key),
            Self::presence(&self.carevoice.client_id),
            self.carevoice.group.as_deref().unwrap_or("unset"),
        );

        let missing = self.carevoice.missing_credentials();
        if !missing.is_empty() {
            warn!("  carevoice: missing {}", missing.join(", "));
        }

        info!("  auth: HS256, expires_in={}", self.auth.jwt_expires_in);
        if self.auth.uses_default_secret() {
            warn!("  auth: using the default JWT secret - set JWT_SECRET");
        }

        info!(
            "  rate_limit: {}/{}ms (keyed by {})",
            self.rate_limit.max_requests,
            self.rate_limit.window_ms,
            if self.rate_limit.trust_forwarded_for {
                "X-Forwarded-For"
            } else {
                "peer address"
            }
        );
        info!("  cors: {}", self.cors.origins.join(", "));
        info!(
            "  storage: {} ({})",
            self.storage.backend, self.storage.database_path
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn presence(value: &Option<String>) -> &'static str {
        if value.as_deref().is_some_and(|v| !v.is_empty()) {
            "***"
        } else {
            "unset"
        }
    }

    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        // Server
        Self::apply_env_string("HOST", &mut self.server.host);
        Self::apply_env_parse("PORT", &mut self.server.port);
        Self::apply_env_string("NODE_ENV", &mut self.server.environment);

        // CareVoice
        Self::apply_env_string("CAREVOICE_API_BASE_URL", &mut self.carevoice.api_base_url);
        Self::apply_env_option_string("CAREVOICE_API_KEY", &mut self.carevoice.api_key);
        Self::apply_env_option_string("CAREVOICE_CLIENT_ID", &mut self.carevoice.client_id);
        Self::apply_env_option_string(
            "CAREVOICE_CLIENT_SECRET",
            &mut self.carevoice.client_secret,
        );
        Self::apply_env_option_string("CAREVOICE_GROUP", &mut self.carevoice.group);
        Self::apply_env_parse("CAREVOICE_TIMEOUT_SECS", &mut self.carevoice.timeout_secs);

        // Auth
        Self::apply_env_string("JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_string("JWT_EXPIRES_IN", &mut self.auth.jwt_expires_in);

        // Rate limit
        Self::apply_env_parse("RATE_LIMIT_WINDOW_MS", &mut self.rate_limit.window_ms);
        Self::apply_env_parse(
            "RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_bool(
            "RATE_LIMIT_TRUST_PROXY",
            &mut self.rate_limit.trust_forwarded_for,
        );

        // CORS
        Self::apply_env_list("CORS_ORIGIN", &mut self.cors.origins);

        // Storage
        if let Ok(val) = std::env::var("STORAGE_BACKEND") {
            self.storage.backend = val.parse()?;
        }
        Self::apply_env_string("DATABASE_PATH", &mut self.storage.database_path);

        // Logging
        Self::apply_env_parse("LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LOG_FILE", &mut self.logging.file);

        Ok(())
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values are ignored and the previous value kept.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.trim().parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply a comma separated environment variable to a list
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
