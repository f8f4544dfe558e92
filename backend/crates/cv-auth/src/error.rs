use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_ms}ms, retry in {retry_after_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_ms: u64,
        retry_after_secs: u64,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// True for failures caused by the caller's credentials rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::JwtEncode { .. } | Self::PasswordHash { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
