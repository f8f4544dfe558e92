//! Axum extractor for bearer session tokens

use crate::{ApiError, AppState};

use cv_auth::Claims;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Claims of a valid `Authorization: Bearer <token>` session token.
///
/// Rejects with 401 "Access token is required" when no token is sent and
/// 401 "Invalid or expired token" when it fails verification.
pub struct Session(pub Claims);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let claims = state.session_validator.validate_header(header)?;
            log::debug!("Authenticated session for subject {}", claims.sub);

            Ok(Session(claims))
        }
    }
}
