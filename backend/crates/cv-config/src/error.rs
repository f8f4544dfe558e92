use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create an auth error
    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::generic("Auth", message)
    }

    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::generic("Config", message)
    }

    /// Create an upstream (CareVoice) error
    #[track_caller]
    pub fn carevoice<S: Into<String>>(message: S) -> Self {
        Self::generic("CareVoice", message)
    }

    /// Create a storage error
    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::generic("Storage", message)
    }

    #[track_caller]
    fn generic<S: Into<String>>(category: &'static str, message: S) -> Self {
        ConfigError::Generic {
            category,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
