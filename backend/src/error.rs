//! API error taxonomy and its mapping to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// No record matches the requested id (404).
    #[error("task {id} not found")]
    NotFound { id: Uuid },

    /// The request body failed the title policy (400).
    #[error("{message}")]
    Validation { message: String },

    /// The store operation failed for reasons the client cannot act on
    /// (500). The underlying cause is logged, never forwarded.
    #[error("store operation failed")]
    Store,
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => ApiError::NotFound { id },
            other => {
                log::error!("store failure: {other}");
                ApiError::Store
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
