//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
///
/// Unlike `axum::Json` this does not insist on a JSON content type, and
/// every decode failure is reported as `400 Bad Request`.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(Self(value))
    }
}
