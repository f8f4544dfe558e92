use crate::{CareVoiceApi, SdkSession, UpstreamResult};

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};

/// Runs the CareVoice authentication sequence for one unique id:
/// server token, then account provisioning, then the account's user token.
///
/// Steps run strictly in order and the first failure is returned unchanged.
/// A partially provisioned account is left as is; the next attempt repeats
/// every step.
#[derive(Clone)]
pub struct CareVoiceAuthenticator {
    api: Arc<dyn CareVoiceApi>,
}

impl CareVoiceAuthenticator {
    pub fn new(api: Arc<dyn CareVoiceApi>) -> Self {
        Self { api }
    }

    pub async fn authenticate(&self, unique_id: &str) -> UpstreamResult<SdkSession> {
        let started = Instant::now();
        info!("[CareVoice] authenticating unique id {}", unique_id);

        let result = self.run_steps(unique_id).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(session) => info!(
                "[CareVoice] authenticated unique id {} as account {} in {}ms",
                unique_id, session.account_id, elapsed_ms
            ),
            Err(failure) => error!(
                "[CareVoice] authentication of unique id {} failed at {} after {}ms: {}",
                unique_id, failure.step, elapsed_ms, failure.payload
            ),
        }

        result
    }

    async fn run_steps(&self, unique_id: &str) -> UpstreamResult<SdkSession> {
        info!("[CareVoice] step 1/3: fetching server token");
        let server_token = self.api.fetch_server_token().await?;

        info!("[CareVoice] step 2/3: provisioning account");
        let account = self
            .api
            .provision_account(&server_token.access_token, unique_id)
            .await?;

        info!(
            "[CareVoice] step 3/3: fetching user token for account {}",
            account.uid
        );
        let user_token = self
            .api
            .fetch_user_token(&server_token.access_token, &account.uid)
            .await?;

        Ok(SdkSession {
            account_id: account.uid,
            server_token: server_token.access_token,
            user_token: user_token.access_token,
            refresh_token: user_token.refresh_token,
            expires_in: user_token.expires_in,
        })
    }

    /// Reachability check: obtains a server token and nothing else.
    pub async fn probe(&self) -> UpstreamResult<()> {
        self.api.fetch_server_token().await.map(|_| ())
    }
}
