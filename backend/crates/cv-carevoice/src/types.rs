use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Server-scoped access token from `POST /auth/token`.
/// Only the token itself is used; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerToken {
    pub access_token: String,
}

/// Account returned by `POST /account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    /// Upstream sends this as either a string or a number
    #[serde(deserialize_with = "account_id_from_string_or_number")]
    pub uid: String,
}

/// Account-scoped tokens from `GET /account/{id}/token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Passed through to the SDK as received, whatever its JSON type
    #[serde(default)]
    pub expires_in: Option<Value>,
}

/// Everything a client SDK needs to talk to CareVoice for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkSession {
    pub account_id: String,
    pub server_token: String,
    pub user_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccountId {
    Text(String),
    Number(Number),
}

fn account_id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAccountId::deserialize(deserializer)? {
        RawAccountId::Text(text) => text,
        RawAccountId::Number(number) => number.to_string(),
    })
}
