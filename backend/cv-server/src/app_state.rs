use crate::error::Result as ServerErrorResult;

use cv_auth::{ClientRateLimiter, JwtIssuer, JwtValidator};
use cv_carevoice::{CareVoiceApi, CareVoiceAuthenticator};
use cv_config::Config;
use cv_store::UserRepository;

use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub authenticator: CareVoiceAuthenticator,
    pub session_issuer: Arc<JwtIssuer>,
    pub session_validator: Arc<JwtValidator>,
    pub rate_limiter: Arc<ClientRateLimiter>,
    /// Key the rate limiter on `X-Forwarded-For` rather than the peer address
    pub trust_forwarded_for: bool,
    pub cors_origins: Arc<[String]>,
}

impl AppState {
    /// Wire state from configuration plus the injected store and upstream client.
    pub fn new(
        config: &Config,
        users: Arc<dyn UserRepository>,
        api: Arc<dyn CareVoiceApi>,
    ) -> ServerErrorResult<Self> {
        let secret = config.auth.jwt_secret.as_bytes();
        let session_ttl = config.auth.session_ttl()?;

        Ok(Self {
            users,
            authenticator: CareVoiceAuthenticator::new(api),
            session_issuer: Arc::new(JwtIssuer::with_hs256(secret, session_ttl)),
            session_validator: Arc::new(JwtValidator::with_hs256(secret)),
            rate_limiter: Arc::new(ClientRateLimiter::new(cv_auth::RateLimitConfig {
                max_requests: config.rate_limit.max_requests,
                window_ms: config.rate_limit.window_ms,
            })),
            trust_forwarded_for: config.rate_limit.trust_forwarded_for,
            cors_origins: config.cors.origins.clone().into(),
        })
    }
}
