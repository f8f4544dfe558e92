use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies locally issued HS256 session tokens
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate JWT token and return claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Validate the value of an `Authorization` header (`Bearer <token>`).
    /// An absent header and a bare `Bearer` prefix both count as missing.
    #[track_caller]
    pub fn validate_header(&self, header: Option<&str>) -> AuthErrorResult<Claims> {
        let header = header
            .map(str::trim)
            .filter(|h| !h.is_empty() && *h != BEARER_PREFIX.trim_end())
            .ok_or_else(|| AuthError::MissingHeader {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.validate(token)
    }
}
