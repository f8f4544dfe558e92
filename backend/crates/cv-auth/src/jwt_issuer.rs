use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Signs HS256 session tokens with a fixed lifetime
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl JwtIssuer {
    pub fn with_hs256(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Fresh claims for `sub`, valid from now for the configured lifetime.
    pub fn claims_for(&self, sub: impl Into<String>) -> Claims {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        Claims {
            sub: sub.into(),
            email: None,
            unique_id: None,
            account_id: None,
            exp: now.saturating_add(ttl_secs),
            iat: now,
        }
    }

    #[track_caller]
    pub fn issue(&self, claims: &Claims) -> AuthErrorResult<String> {
        claims.validate()?;

        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|source| {
            AuthError::JwtEncode {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
