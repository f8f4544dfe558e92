use crate::{ApiError, CareVoiceRequest, Credentials, CredentialsRequest, ValidatedJson};

use axum::{body::Body, extract::FromRequest, http::Request};

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_valid_credentials_are_extracted() {
    let request = json_request(r#"{"email":"a@x.com","password":"secret1"}"#);

    let ValidatedJson(Credentials { email, password }) =
        ValidatedJson::<CredentialsRequest>::from_request(request, &())
            .await
            .unwrap();

    assert_eq!(email, "a@x.com");
    assert_eq!(password, "secret1");
}

#[tokio::test]
async fn test_invalid_credentials_collect_every_error() {
    let request = json_request(r#"{"email":"not-an-email","password":"12"}"#);

    let result = ValidatedJson::<CredentialsRequest>::from_request(request, &()).await;

    match result {
        Err(ApiError::Validation { errors, .. }) => assert_eq!(errors.len(), 2),
        Err(other) => panic!("Expected Validation, got {:?}", other),
        Ok(_) => panic!("Expected rejection"),
    }
}

#[tokio::test]
async fn test_wrong_field_type_is_validation_error() {
    let request = json_request(r#"{"uniqueId": 42}"#);

    let result = ValidatedJson::<CareVoiceRequest>::from_request(request, &()).await;

    assert!(matches!(result, Err(ApiError::Validation { .. })));
}

#[tokio::test]
async fn test_unique_id_is_extracted() {
    let request = json_request(r#"{"uniqueId":"device-42"}"#);

    let ValidatedJson(unique_id) = ValidatedJson::<CareVoiceRequest>::from_request(request, &())
        .await
        .unwrap();

    assert_eq!(unique_id, "device-42");
}
