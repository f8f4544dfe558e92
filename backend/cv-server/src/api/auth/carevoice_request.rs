use crate::ValidateRequest;

use cv_core::validate_unique_id;

use serde::Deserialize;

/// Body of `POST /api/auth/carevoice`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareVoiceRequest {
    #[serde(default)]
    pub unique_id: Option<String>,
}

impl ValidateRequest for CareVoiceRequest {
    type Valid = String;

    fn validate(self) -> cv_core::Result<String> {
        validate_unique_id(self.unique_id.as_deref())?;
        Ok(self.unique_id.unwrap_or_default())
    }
}
