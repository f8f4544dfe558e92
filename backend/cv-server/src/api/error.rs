//! REST API error types
//!
//! Every failure renders as `{success: false, message, code, error?, errors?}`
//! with the matching HTTP status. Internal detail only reaches the logs.

use cv_auth::AuthError;
use cv_carevoice::UpstreamFailure;
use cv_core::CoreError;
use cv_store::StoreError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const TOKEN_REQUIRED_MESSAGE: &str = "Access token is required";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const UPSTREAM_FAILED_MESSAGE: &str = "CareVoiceOS authentication failed";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests, please try again later";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: &'static str,
    /// Upstream payload, passed through as received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Field-level validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation (400)
    #[error("Validation failed: {} {location}", .errors.join("; "))]
    Validation {
        errors: Vec<String>,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Bad credentials or session token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// A CareVoice call failed (400)
    #[error("Upstream failure: {failure} {location}")]
    Upstream {
        failure: UpstreamFailure,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Client exceeded its request quota (429)
    #[error("Too many requests, retry in {retry_after_secs}s {location}")]
    TooManyRequests {
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } | Self::Upstream { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let mut retry_after = None;
        let body = match self {
            ApiError::Validation { errors, .. } => ApiErrorResponse {
                success: false,
                message: VALIDATION_MESSAGE.into(),
                code: "VALIDATION_ERROR",
                error: None,
                errors: Some(errors),
            },
            ApiError::BadRequest { message, .. } => ApiErrorResponse {
                success: false,
                message,
                code: "BAD_REQUEST",
                error: None,
                errors: None,
            },
            ApiError::Unauthorized { message, .. } => ApiErrorResponse {
                success: false,
                message,
                code: "UNAUTHORIZED",
                error: None,
                errors: None,
            },
            ApiError::Upstream { failure, .. } => ApiErrorResponse {
                success: false,
                message: UPSTREAM_FAILED_MESSAGE.into(),
                code: "UPSTREAM_ERROR",
                error: Some(failure.payload),
                errors: None,
            },
            ApiError::NotFound { message, .. } => ApiErrorResponse {
                success: false,
                message,
                code: "NOT_FOUND",
                error: None,
                errors: None,
            },
            ApiError::TooManyRequests {
                retry_after_secs, ..
            } => {
                retry_after = Some(retry_after_secs);
                ApiErrorResponse {
                    success: false,
                    message: TOO_MANY_REQUESTS_MESSAGE.into(),
                    code: "RATE_LIMIT_EXCEEDED",
                    error: None,
                    errors: None,
                }
            }
            // Don't expose internal details to clients
            ApiError::Internal { .. } => ApiErrorResponse {
                success: false,
                message: INTERNAL_MESSAGE.into(),
                code: "INTERNAL_ERROR",
                error: None,
                errors: None,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Field rule violations become a validation error
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { errors, .. } => ApiError::Validation {
                errors,
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::internal(other.to_string()),
        }
    }
}

/// Unreadable or mistyped JSON bodies are validation errors too
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            errors: vec![rejection.body_text()],
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail { .. } => ApiError::bad_request(USER_EXISTS_MESSAGE),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingHeader { .. } => ApiError::unauthorized(TOKEN_REQUIRED_MESSAGE),
            AuthError::RateLimitExceeded {
                retry_after_secs, ..
            } => ApiError::TooManyRequests {
                retry_after_secs,
                location: ErrorLocation::from(Location::caller()),
            },
            e if e.is_client_error() => {
                log::debug!("Rejected session token: {}", e);
                ApiError::unauthorized(INVALID_TOKEN_MESSAGE)
            }
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<UpstreamFailure> for ApiError {
    #[track_caller]
    fn from(failure: UpstreamFailure) -> Self {
        ApiError::Upstream {
            failure,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    #[track_caller]
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("Background task failed: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
