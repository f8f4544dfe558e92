pub mod claims;
pub mod client_rate_limiter;
pub mod error;
pub mod jwt_issuer;
pub mod jwt_validator;
pub mod password;
pub mod rate_limit_config;

pub use claims::Claims;
pub use client_rate_limiter::ClientRateLimiter;
pub use error::{AuthError, Result};
pub use jwt_issuer::JwtIssuer;
pub use jwt_validator::JwtValidator;
pub use password::{hash_password, verify_password};
pub use rate_limit_config::RateLimitConfig;

#[cfg(test)]
mod tests;
