use crate::ValidateRequest;

use cv_core::validate_credentials;

use serde::Deserialize;

/// Body of register and login requests
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Credentials that passed field validation
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl ValidateRequest for CredentialsRequest {
    type Valid = Credentials;

    fn validate(self) -> cv_core::Result<Credentials> {
        validate_credentials(self.email.as_deref(), self.password.as_deref())?;

        Ok(Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}
