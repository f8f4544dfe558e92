pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod rate_limit;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{authenticate_carevoice, login, profile, register},
        carevoice_auth_response::CareVoiceAuthResponse,
        carevoice_request::CareVoiceRequest,
        credentials_request::{Credentials, CredentialsRequest},
        login_response::LoginResponse,
        profile_dto::ProfileDto,
        register_response::RegisterResponse,
        sdk_credentials_dto::SdkCredentialsDto,
        user_dto::UserDto,
    },
    envelope::ApiResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::{
        session::Session,
        validated_json::{ValidateRequest, ValidatedJson},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
