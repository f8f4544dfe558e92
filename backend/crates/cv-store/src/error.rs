use error_location::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User already exists: {email} {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row, column '{column}': {message} {location}")]
    CorruptRow {
        column: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn corrupt_row(column: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRow {
            column,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
