use crate::{
    AuthStep, CareVoiceApi, CareVoiceError, ProvisionedAccount, Result as CareVoiceResult,
    ServerToken, UpstreamFailure, UpstreamResult, UserToken,
};

use cv_config::CareVoiceConfig;

use std::panic::Location;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, error, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

const API_KEY_HEADER: &str = "X-Api-Key";
const JSON_CONTENT_TYPE: &str = "application/json";
const MASK: &str = "***";
const UNSET: &str = "unset";

/// reqwest-backed client for the CareVoice open API
pub struct HttpCareVoiceClient {
    base_url: Url,
    api_key: Option<String>,
    client_id: String,
    client_secret: String,
    group: String,
    client: ReqwestClient,
}

impl HttpCareVoiceClient {
    /// Build a client from configuration.
    /// Missing credentials are sent as empty strings so upstream reports them.
    #[track_caller]
    pub fn new(config: &CareVoiceConfig) -> CareVoiceResult<Self> {
        let base_url = Self::parse_base_url(&config.api_base_url)?;
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            client_id: config.client_id.clone().unwrap_or_default(),
            client_secret: config.client_secret.clone().unwrap_or_default(),
            group: config.group.clone().unwrap_or_default(),
            client,
        })
    }

    #[track_caller]
    fn parse_base_url(raw: &str) -> CareVoiceResult<Url> {
        let message = match Url::parse(raw) {
            Ok(url) if !url.cannot_be_a_base() => return Ok(url),
            Ok(_) => "URL cannot carry a path".to_string(),
            Err(e) => e.to_string(),
        };

        Err(CareVoiceError::InvalidBaseUrl {
            url: raw.to_string(),
            message,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: parse_base_url rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a request carrying the API key and JSON content type
    fn request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        info!(
            "[CareVoice API] {} {} (X-Api-Key: {}, Authorization: {})",
            method,
            url,
            if self.api_key.is_some() { MASK } else { UNSET },
            if bearer.is_some() { "Bearer ***" } else { UNSET },
        );

        let mut req = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if let Some(ref api_key) = self.api_key {
            req = req.header(API_KEY_HEADER, api_key);
        }

        if let Some(token) = bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        req
    }

    /// Execute request and fold every failure mode into `UpstreamFailure`
    async fn execute<T: DeserializeOwned>(
        &self,
        step: AuthStep,
        req: RequestBuilder,
    ) -> UpstreamResult<T> {
        let started = Instant::now();

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "[CareVoice API] {} failed after {}ms: {}",
                    step,
                    started.elapsed().as_millis(),
                    e
                );
                return Err(UpstreamFailure::message(step, e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(
                    "[CareVoice API] {} body unreadable after {}ms (status {}): {}",
                    step,
                    started.elapsed().as_millis(),
                    status.as_u16(),
                    e
                );
                return Err(UpstreamFailure::new(
                    step,
                    Some(status.as_u16()),
                    json!(e.to_string()),
                ));
            }
        };
        let elapsed_ms = started.elapsed().as_millis();

        if !status.is_success() {
            error!(
                "[CareVoice API] {} returned {} in {}ms: {}",
                step,
                status.as_u16(),
                elapsed_ms,
                body
            );
            return Err(UpstreamFailure::from_body(step, status.as_u16(), &body));
        }

        info!(
            "[CareVoice API] {} returned {} in {}ms",
            step,
            status.as_u16(),
            elapsed_ms
        );
        debug!("[CareVoice API] {} response body: {}", step, body);

        serde_json::from_str(&body).map_err(|e| {
            error!("[CareVoice API] {} response malformed: {}", step, e);
            if body.trim().is_empty() {
                UpstreamFailure::new(step, Some(status.as_u16()), json!(e.to_string()))
            } else {
                UpstreamFailure::from_body(step, status.as_u16(), &body)
            }
        })
    }
}

#[async_trait]
impl CareVoiceApi for HttpCareVoiceClient {
    async fn fetch_server_token(&self) -> UpstreamResult<ServerToken> {
        #[derive(Serialize)]
        struct TokenRequest<'a> {
            client_id: &'a str,
            client_secret: &'a str,
        }

        debug!(
            "[CareVoice API] request body: {}",
            json!({ "client_id": self.client_id, "client_secret": MASK })
        );

        let body = TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };
        let req = self
            .request(Method::POST, self.endpoint(&["auth", "token"]), None)
            .json(&body);
        self.execute(AuthStep::ServerToken, req).await
    }

    async fn provision_account(
        &self,
        server_token: &str,
        unique_id: &str,
    ) -> UpstreamResult<ProvisionedAccount> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct AccountRequest<'a> {
            group: &'a str,
            unique_id: &'a str,
        }

        let body = AccountRequest {
            group: &self.group,
            unique_id,
        };
        debug!(
            "[CareVoice API] request body: {}",
            json!({ "group": body.group, "uniqueId": body.unique_id })
        );

        let req = self
            .request(Method::POST, self.endpoint(&["account"]), Some(server_token))
            .json(&body);
        self.execute(AuthStep::ProvisionAccount, req).await
    }

    async fn fetch_user_token(
        &self,
        server_token: &str,
        account_id: &str,
    ) -> UpstreamResult<UserToken> {
        let req = self.request(
            Method::GET,
            self.endpoint(&["account", account_id, "token"]),
            Some(server_token),
        );
        self.execute(AuthStep::UserToken, req).await
    }
}
