use crate::{ProvisionedAccount, ServerToken, UpstreamResult, UserToken};

use async_trait::async_trait;

/// The three CareVoice open-API calls used to authenticate a user.
///
/// Each call is independent and never panics: transport errors, non-2xx
/// responses and unreadable bodies all come back as `UpstreamFailure`.
#[async_trait]
pub trait CareVoiceApi: Send + Sync {
    async fn fetch_server_token(&self) -> UpstreamResult<ServerToken>;

    /// Create (or fetch, upstream is idempotent) the account for `unique_id`.
    async fn provision_account(
        &self,
        server_token: &str,
        unique_id: &str,
    ) -> UpstreamResult<ProvisionedAccount>;

    async fn fetch_user_token(&self, server_token: &str, account_id: &str)
    -> UpstreamResult<UserToken>;
}
