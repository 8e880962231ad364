//! Request extractors whose rejections render through [`AppError`], so every
//! error body is JSON.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body.
///
/// A body that cannot be read as the expected object (missing content type,
/// malformed JSON, a top-level array) is taken as empty input, and field
/// validation then reports what is missing. Failing to buffer the body, for
/// example when it exceeds the size limit, still rejects the request.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(JsonRejection::BytesRejection(rejection)) => {
                Err(AppError::Rejected(rejection.status(), rejection.body_text()))
            }
            Err(rejection) => {
                tracing::debug!("Unreadable JSON body taken as empty input: {rejection}");
                Ok(AppJson(T::default()))
            }
        }
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}
