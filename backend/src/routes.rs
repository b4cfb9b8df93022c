use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::api::{create_task, delete_task, health, list_tasks, update_task};
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub reject_blank_titles: bool,
}

/// Build the application router: the four task endpoints, the liveness
/// probe, and the compiled frontend served from `/`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", patch(update_task).delete(delete_task))
        .route("/health", get(health))
        .nest_service("/", ServeDir::new("frontend/dist"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
