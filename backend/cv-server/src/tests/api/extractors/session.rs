use crate::{ApiError, AppState, Session};

use cv_carevoice::{
    AuthStep, CareVoiceApi, ProvisionedAccount, ServerToken, UpstreamFailure, UpstreamResult,
    UserToken,
};
use cv_config::Config;
use cv_store::InMemoryUserRepository;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, extract::FromRequestParts, http::Request};

const SECRET: &str = "session-extractor-test-secret-0123456789";

/// Upstream that is never expected to be called
struct UnreachableApi;

#[async_trait]
impl CareVoiceApi for UnreachableApi {
    async fn fetch_server_token(&self) -> UpstreamResult<ServerToken> {
        Err(UpstreamFailure::message(AuthStep::ServerToken, "unreachable"))
    }

    async fn provision_account(&self, _: &str, _: &str) -> UpstreamResult<ProvisionedAccount> {
        Err(UpstreamFailure::message(
            AuthStep::ProvisionAccount,
            "unreachable",
        ))
    }

    async fn fetch_user_token(&self, _: &str, _: &str) -> UpstreamResult<UserToken> {
        Err(UpstreamFailure::message(AuthStep::UserToken, "unreachable"))
    }
}

fn create_test_state() -> AppState {
    let mut config = Config::default();
    config.auth.jwt_secret = SECRET.to_string();

    AppState::new(
        &config,
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(UnreachableApi),
    )
    .expect("Failed to build test state")
}

async fn extract(state: &AppState, authorization: Option<&str>) -> Result<Session, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _) = builder.body(Body::empty()).unwrap().into_parts();

    Session::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_extractor_with_valid_token() {
    let state = create_test_state();
    let claims = state
        .session_issuer
        .claims_for("user-1")
        .with_email("a@x.com");
    let token = state.session_issuer.issue(&claims).unwrap();

    let Session(extracted) = extract(&state, Some(&format!("Bearer {}", token)))
        .await
        .unwrap();

    assert_eq!(extracted.sub, "user-1");
    assert_eq!(extracted.email.as_deref(), Some("a@x.com"));
}

#[tokio::test]
async fn test_extractor_without_header() {
    let state = create_test_state();

    let result = extract(&state, None).await;

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { ref message, .. }) if message == "Access token is required"
    ));
}

#[tokio::test]
async fn test_extractor_with_wrong_scheme() {
    let state = create_test_state();

    let result = extract(&state, Some("Basic YTpi")).await;

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { ref message, .. }) if message == "Invalid or expired token"
    ));
}

#[tokio::test]
async fn test_extractor_with_garbage_token() {
    let state = create_test_state();

    let result = extract(&state, Some("Bearer not.a.jwt")).await;

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { ref message, .. }) if message == "Invalid or expired token"
    ));
}
