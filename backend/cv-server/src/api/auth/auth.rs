//! Authentication REST API handlers
//!
//! Local registration and login, direct CareVoice authentication for a
//! caller-supplied unique id, and the session-protected profile.

use crate::{
    ApiError, ApiResponse, ApiResult, AppState, CareVoiceAuthResponse, CareVoiceRequest,
    Credentials, CredentialsRequest, LoginResponse, ProfileDto, RegisterResponse,
    SdkCredentialsDto, Session, UserDto, ValidatedJson,
    api::error::{INVALID_CREDENTIALS_MESSAGE, USER_EXISTS_MESSAGE, USER_NOT_FOUND_MESSAGE},
};

use cv_auth::{hash_password, verify_password};
use cv_core::User;

use axum::{Json, extract::State, http::StatusCode};
use log::info;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/register
///
/// Create a local user with a fresh UDID and return a session token.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    let Credentials { email, password } = credentials;

    if state.users.exists(&email).await? {
        return Err(ApiError::bad_request(USER_EXISTS_MESSAGE));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    // A racing registration for the same email fails here as DuplicateEmail
    let user = state.users.insert(User::new(email, password_hash)).await?;
    info!("[Register] created user {} ({}), UDID {}", user.email, user.id, user.udid);

    let claims = state
        .session_issuer
        .claims_for(user.id.to_string())
        .with_email(&user.email);
    let token = state.session_issuer.issue(&claims)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            RegisterResponse {
                user: UserDto::from(&user),
                token,
            },
        )),
    ))
}

/// POST /api/auth/login
///
/// Verify local credentials, then authenticate the user's UDID with CareVoice.
/// Bad credentials never reach upstream.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<CredentialsRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let Credentials { email, password } = credentials;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;

    let stored_hash = user.password_hash.clone();
    let password_matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;
    if !password_matches {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
    }

    info!(
        "[Login] authenticating {} with CareVoice, UDID {}",
        user.email, user.udid
    );
    let session = state.authenticator.authenticate(user.udid.as_str()).await?;
    info!(
        "[Login] {} authenticated, UDID {}, account {}",
        user.email, user.udid, session.account_id
    );

    let claims = state
        .session_issuer
        .claims_for(user.id.to_string())
        .with_email(&user.email)
        .with_account_id(&session.account_id);
    let token = state.session_issuer.issue(&claims)?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            user: UserDto::from(&user),
            token,
            sdk: SdkCredentialsDto::from(&session),
        },
    )))
}

/// POST /api/auth/carevoice
///
/// Authenticate an arbitrary unique id with CareVoice, no local user involved.
pub async fn authenticate_carevoice(
    State(state): State<AppState>,
    ValidatedJson(unique_id): ValidatedJson<CareVoiceRequest>,
) -> ApiResult<Json<ApiResponse<CareVoiceAuthResponse>>> {
    let session = state.authenticator.authenticate(&unique_id).await?;

    let claims = state
        .session_issuer
        .claims_for(unique_id.as_str())
        .with_unique_id(unique_id.as_str())
        .with_account_id(&session.account_id);
    let token = state.session_issuer.issue(&claims)?;

    Ok(Json(ApiResponse::ok(
        "CareVoiceOS authentication successful",
        CareVoiceAuthResponse {
            sdk: SdkCredentialsDto::from(&session),
            token,
            account_id: session.account_id,
        },
    )))
}

/// GET /api/auth/profile
///
/// Profile of the local user named by the session token's subject.
/// Direct CareVoice sessions have a unique id as subject and no local user.
pub async fn profile(
    State(state): State<AppState>,
    Session(claims): Session,
) -> ApiResult<Json<ApiResponse<ProfileDto>>> {
    // A caller-chosen unique id may look like a user id; never resolve those
    let user_id = match (&claims.unique_id, Uuid::parse_str(&claims.sub)) {
        (None, Ok(user_id)) => user_id,
        _ => return Err(ApiError::not_found(USER_NOT_FOUND_MESSAGE)),
    };

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND_MESSAGE))?;

    Ok(Json(ApiResponse::ok(
        "Profile retrieved successfully",
        ProfileDto::from(&user),
    )))
}
