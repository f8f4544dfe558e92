//! JSON body extractor that applies field rules before the handler runs

use crate::ApiError;

use std::future::Future;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// A request body that can be checked and turned into its validated form.
pub trait ValidateRequest: DeserializeOwned {
    type Valid;

    fn validate(self) -> cv_core::Result<Self::Valid>;
}

/// Extracts `R` from a JSON body and yields `R::Valid`.
/// Malformed JSON and rule violations both reject with 400 "Validation error".
pub struct ValidatedJson<R: ValidateRequest>(pub R::Valid);

impl<S, R> FromRequest<S> for ValidatedJson<R>
where
    S: Send + Sync,
    R: ValidateRequest + Send,
    R::Valid: Send,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Json(body) = Json::<R>::from_request(req, state).await?;
            Ok(ValidatedJson(body.validate()?))
        }
    }
}
