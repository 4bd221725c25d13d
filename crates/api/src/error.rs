//! HTTP error type.
//!
//! Clients see two kinds of failure, both as a plain-text body:
//! `400 Bad Request` for undecodable bodies and references to rows that do
//! not exist, `500 Internal Server Error` for everything the store reports,
//! including a missing row during read-before-update.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::DbError;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(DbError),
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::MissingReference { .. } => Self::BadRequest(e.to_string()),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Internal(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}
