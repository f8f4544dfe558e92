mod auth_config;
mod carevoice_config;
mod config;
mod cors_config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use carevoice_config::CareVoiceConfig;
pub use config::Config;
pub use cors_config::CorsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use storage_config::{StorageBackend, StorageConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const MIN_PORT: u16 = 1024;
const DEFAULT_ENVIRONMENT: &str = "development";
const PRODUCTION_ENVIRONMENT: &str = "production";

const DEFAULT_CAREVOICE_BASE_URL: &str = "https://gravitee-gateway.kangyu.info/os3/api/open/v1";
const DEFAULT_CAREVOICE_TIMEOUT_SECS: u64 = 30;

const DEFAULT_JWT_SECRET: &str = "default-secret-key";
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_JWT_EXPIRES_IN: &str = "24h";

const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:8081"];

const DEFAULT_DATABASE_FILENAME: &str = "users.db";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
