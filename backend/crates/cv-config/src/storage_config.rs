use crate::{ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which identity store backs the user repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::storage(format!(
                "unknown storage backend '{}', expected 'memory' or 'sqlite'",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// SQLite file, relative to the config directory
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: String::from(DEFAULT_DATABASE_FILENAME),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database_path);
        if db_path.is_absolute() || self.database_path.contains("..") {
            return Err(ConfigError::storage(
                "storage.database_path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
