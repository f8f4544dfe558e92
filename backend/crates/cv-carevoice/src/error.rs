use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;
use thiserror::Error;

/// Step of the three-call CareVoice authentication sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStep {
    ServerToken,
    ProvisionAccount,
    UserToken,
}

impl AuthStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerToken => "server_token",
            Self::ProvisionAccount => "provision_account",
            Self::UserToken => "user_token",
        }
    }
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed upstream call.
///
/// `payload` is what gets shown to API callers: the upstream response body
/// (parsed JSON, or the raw text as a JSON string) when one was received,
/// otherwise a description of the transport error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("CareVoice {step} call failed (status: {status:?}): {payload}")]
pub struct UpstreamFailure {
    pub step: AuthStep,
    pub status: Option<u16>,
    pub payload: Value,
}

impl UpstreamFailure {
    pub fn new(step: AuthStep, status: Option<u16>, payload: Value) -> Self {
        Self {
            step,
            status,
            payload,
        }
    }

    /// Failure with a plain message payload and no HTTP status.
    pub fn message(step: AuthStep, message: impl Into<String>) -> Self {
        Self::new(step, None, Value::String(message.into()))
    }

    /// Failure carrying an upstream response body.
    /// Bodies that are not JSON are kept verbatim as a string.
    pub fn from_body(step: AuthStep, status: u16, body: &str) -> Self {
        let payload = if body.trim().is_empty() {
            Value::String(format!("Request failed with status code {}", status))
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };

        Self::new(step, Some(status), payload)
    }
}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamFailure>;

/// Errors constructing the upstream client
#[derive(Error, Debug)]
pub enum CareVoiceError {
    #[error("Invalid CareVoice base URL '{url}': {message} {location}")]
    InvalidBaseUrl {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to build HTTP client: {source} {location}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for CareVoiceError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::ClientBuild {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CareVoiceError>;
