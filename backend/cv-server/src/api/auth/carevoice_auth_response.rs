use crate::SdkCredentialsDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareVoiceAuthResponse {
    pub sdk: SdkCredentialsDto,
    pub token: String,
    pub account_id: String,
}
