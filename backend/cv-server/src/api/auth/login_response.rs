use crate::{SdkCredentialsDto, UserDto};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserDto,
    /// Session token for this API
    pub token: String,
    pub sdk: SdkCredentialsDto,
}
