#![allow(dead_code)]

//! Test infrastructure for cv-server API tests

use cv_carevoice::{
    AuthStep, CareVoiceApi, ProvisionedAccount, ServerToken, UpstreamFailure, UpstreamResult,
    UserToken,
};
use cv_config::Config;
use cv_server::{AppState, build_router};
use cv_store::{InMemoryUserRepository, UserRepository};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const STUB_SERVER_TOKEN: &str = "stub-server-token";
pub const STUB_USER_TOKEN: &str = "stub-user-token";
pub const STUB_REFRESH_TOKEN: &str = "stub-refresh-token";
pub const STUB_ACCOUNT_ID: &str = "acct-1001";

/// In-process CareVoice double: counts calls and remembers provisioned ids
#[derive(Default)]
pub struct StubCareVoiceApi {
    fail_at: Mutex<Option<AuthStep>>,
    calls: AtomicUsize,
    provisioned: Mutex<Vec<String>>,
}

impl StubCareVoiceApi {
    pub fn failing_at(step: AuthStep) -> Self {
        let stub = Self::default();
        stub.fail_at(Some(step));
        stub
    }

    pub fn fail_at(&self, step: Option<AuthStep>) {
        *self.fail_at.lock().unwrap() = step;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn provisioned_ids(&self) -> Vec<String> {
        self.provisioned.lock().unwrap().clone()
    }

    fn enter(&self, step: AuthStep) -> UpstreamResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_at.lock().unwrap() == Some(step) {
            return Err(UpstreamFailure::new(
                step,
                Some(401),
                json!({ "code": "UNAUTHORIZED", "message": "invalid client" }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CareVoiceApi for StubCareVoiceApi {
    async fn fetch_server_token(&self) -> UpstreamResult<ServerToken> {
        self.enter(AuthStep::ServerToken)?;
        Ok(ServerToken {
            access_token: STUB_SERVER_TOKEN.to_string(),
        })
    }

    async fn provision_account(
        &self,
        _server_token: &str,
        unique_id: &str,
    ) -> UpstreamResult<ProvisionedAccount> {
        self.enter(AuthStep::ProvisionAccount)?;
        self.provisioned.lock().unwrap().push(unique_id.to_string());
        Ok(ProvisionedAccount {
            uid: STUB_ACCOUNT_ID.to_string(),
        })
    }

    async fn fetch_user_token(
        &self,
        _server_token: &str,
        _account_id: &str,
    ) -> UpstreamResult<UserToken> {
        self.enter(AuthStep::UserToken)?;
        Ok(UserToken {
            access_token: STUB_USER_TOKEN.to_string(),
            refresh_token: Some(STUB_REFRESH_TOKEN.to_string()),
            expires_in: Some(json!(3600)),
        })
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "test-secret-key-at-least-32-bytes!!".to_string();
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upstream: Arc<StubCareVoiceApi>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(test_config(), StubCareVoiceApi::default())
}

pub fn create_test_app_with(config: Config, upstream: StubCareVoiceApi) -> TestApp {
    let upstream = Arc::new(upstream);
    let users = Arc::new(InMemoryUserRepository::new());

    let state = AppState::new(
        &config,
        users.clone() as Arc<dyn UserRepository>,
        upstream.clone() as Arc<dyn CareVoiceApi>,
    )
    .expect("Failed to build test state");

    TestApp {
        router: build_router(state.clone()),
        state,
        upstream,
        users,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Register and return the response body
    pub async fn register(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/auth/register",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
        )
        .await
    }
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
