pub mod authenticator;
pub mod client;
pub mod error;
pub mod types;

pub use authenticator::CareVoiceAuthenticator;
pub use client::api::CareVoiceApi;
pub use client::http_client::HttpCareVoiceClient;
pub use error::{AuthStep, CareVoiceError, Result, UpstreamFailure, UpstreamResult};
pub use types::{ProvisionedAccount, SdkSession, ServerToken, UserToken};
