//! Task id path extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use docket_core::{DocketError, TaskId};

/// Extracts a [`TaskId`] from the `:id` path segment.
///
/// An id that is not a UUID is a validation error (400), never a 404.
#[derive(Debug, Clone, Copy)]
pub struct TaskIdPath(pub TaskId);

#[async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError(DocketError::validation(e.body_text())))?;

        raw.parse::<TaskId>().map(TaskIdPath).map_err(AppError)
    }
}
