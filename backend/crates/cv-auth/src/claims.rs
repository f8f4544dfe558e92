use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Session token claims.
///
/// Tokens issued at registration carry `sub` + `email`; login adds the
/// CareVoice `account_id`; direct provider authentication carries
/// `unique_id` + `account_id` with the unique id as subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (local user id, or the unique id for direct provider sessions)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.iat > self.exp {
            return Err(AuthError::InvalidClaim {
                claim: "iat".to_string(),
                message: "issued after expiry".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.email.as_deref().is_some_and(str::is_empty) {
            return Err(AuthError::InvalidClaim {
                claim: "email".to_string(),
                message: "email cannot be empty when present".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
