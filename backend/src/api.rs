//! The four task handlers: list, create, patch by id, delete by id.
//!
//! Each handler is stateless pass-through: validate if the policy asks for
//! it, make one store call, serialize the result.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::{CreateTaskRequest, DeleteResponse, Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::{ApiError, Result as ApiResult};
use crate::routes::AppState;

/// GET /api/tasks
///
/// All tasks, newest first. No partial results: a store failure fails the
/// whole request.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.find_all().await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    if state.reject_blank_titles && req.title.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "title must not be blank".to_string(),
        });
    }

    let task = state.store.create(req).await?;
    Ok(Json(task))
}

/// PATCH /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    if state.reject_blank_titles {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ApiError::Validation {
                    message: "title must not be blank".to_string(),
                });
            }
        }
    }

    let task = state.store.update_by_id(id, patch).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    state.store.delete_by_id(id).await?;
    Ok(Json(DeleteResponse::ok()))
}

/// GET /health - liveness probe, no store access
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
