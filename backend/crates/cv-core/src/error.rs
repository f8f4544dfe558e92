use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// One or more request fields failed validation; `errors` carries one
    /// message per failed rule.
    #[error("Validation error: {} {location}", .errors.join("; "))]
    Validation {
        errors: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Invalid UDID '{value}' {location}")]
    InvalidUdid {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
