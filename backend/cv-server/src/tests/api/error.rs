use crate::ApiError;

use cv_auth::AuthError;
use cv_carevoice::{AuthStep, UpstreamFailure};
use cv_core::CoreError;
use cv_store::StoreError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::{StatusCode, header::RETRY_AFTER};
use http_body_util::BodyExt;
use serde_json::{Value, json};

async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_validation_error_returns_400_with_errors() {
    let error = ApiError::Validation {
        errors: vec!["\"email\" is required".into()],
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation error");
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"], json!(["\"email\" is required"]));
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_upstream_error_returns_400_with_payload() {
    let failure = UpstreamFailure::new(
        AuthStep::UserToken,
        Some(403),
        json!({ "message": "account disabled" }),
    );
    let response = ApiError::from(failure).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "CareVoiceOS authentication failed");
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"]["message"], "account disabled");
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let response = ApiError::unauthorized("Invalid credentials").into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_too_many_requests_sets_retry_after() {
    let error = ApiError::TooManyRequests {
        retry_after_secs: 42,
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get(RETRY_AFTER).unwrap(), "42");

    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = ApiError::internal("disk on fire at /var/lib/users.db").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Internal server error");
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[test]
fn test_core_validation_error_converts_to_validation() {
    let core_err = cv_core::validate_credentials(None, Some("123")).unwrap_err();
    assert!(matches!(core_err, CoreError::Validation { .. }));

    let api_err: ApiError = core_err.into();

    match api_err {
        ApiError::Validation { errors, .. } => assert_eq!(errors.len(), 2),
        other => panic!("Expected Validation, got {:?}", other),
    }
}

#[test]
fn test_duplicate_email_converts_to_user_exists() {
    let api_err: ApiError = StoreError::duplicate_email("a@x.com").into();

    match api_err {
        ApiError::BadRequest { message, .. } => assert_eq!(message, "User already exists"),
        other => panic!("Expected BadRequest, got {:?}", other),
    }
}

#[test]
fn test_missing_header_converts_to_token_required() {
    let auth_err = AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    };

    let api_err: ApiError = auth_err.into();

    match api_err {
        ApiError::Unauthorized { message, .. } => {
            assert_eq!(message, "Access token is required")
        }
        other => panic!("Expected Unauthorized, got {:?}", other),
    }
}

#[test]
fn test_expired_token_converts_to_invalid_token() {
    let auth_err = AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    };

    let api_err: ApiError = auth_err.into();

    match api_err {
        ApiError::Unauthorized { message, .. } => {
            assert_eq!(message, "Invalid or expired token")
        }
        other => panic!("Expected Unauthorized, got {:?}", other),
    }
}

#[test]
fn test_password_hash_failure_converts_to_internal() {
    let auth_err = AuthError::PasswordHash {
        message: "bad params".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_err: ApiError = auth_err.into();

    assert_eq!(api_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_rate_limit_error_converts_to_too_many_requests() {
    let auth_err = AuthError::RateLimitExceeded {
        limit: 2,
        window_ms: 60_000,
        retry_after_secs: 30,
        location: ErrorLocation::from(Location::caller()),
    };

    let api_err: ApiError = auth_err.into();

    assert!(matches!(
        api_err,
        ApiError::TooManyRequests {
            retry_after_secs: 30,
            ..
        }
    ));
}
