use cv_carevoice::SdkSession;

use serde::Serialize;
use serde_json::Value;

/// Tokens the client SDK uses to talk to CareVoice directly
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkCredentialsDto {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// As sent by CareVoice
    pub expires_in: Option<Value>,
}

impl From<&SdkSession> for SdkCredentialsDto {
    fn from(session: &SdkSession) -> Self {
        Self {
            access_token: session.user_token.clone(),
            refresh_token: session.refresh_token.clone(),
            expires_in: session.expires_in.clone(),
        }
    }
}
