pub mod auth;
pub mod carevoice_auth_response;
pub mod carevoice_request;
pub mod credentials_request;
pub mod login_response;
pub mod profile_dto;
pub mod register_response;
pub mod sdk_credentials_dto;
pub mod user_dto;
