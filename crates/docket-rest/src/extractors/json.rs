//! JSON body extractor with enveloped rejections.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use docket_core::DocketError;
use serde::de::DeserializeOwned;

/// Like [`Json`], but a malformed body becomes a `VALIDATION_ERROR`
/// response in the usual envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError(DocketError::validation(format!("Invalid JSON: {}", rejection.body_text())))
            })?;

        Ok(ApiJson(value))
    }
}
