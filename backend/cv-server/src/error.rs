use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Startup failures of the server binary
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] cv_config::ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] cv_store::StoreError),

    #[error("CareVoice client error: {0}")]
    CareVoice(#[from] cv_carevoice::CareVoiceError),

    #[error("Failed to bind {addr}: {source} {location}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl ServerError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for ServerError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
