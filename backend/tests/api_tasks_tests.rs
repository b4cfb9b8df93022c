//! Integration tests for the task API, driven through the real router
//! against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use backend::store::MemoryTaskStore;
use backend::{build_router, AppState};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app_with_policy(true)
}

fn app_with_policy(reject_blank_titles: bool) -> Router {
    build_router(AppState {
        store: Arc::new(MemoryTaskStore::default()),
        reject_blank_titles,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn create_returns_store_assigned_defaults() {
    let app = test_app();

    let task = create(&app, "Buy milk").await;

    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["completed"], false);
    assert!(!task["id"].as_str().unwrap().is_empty());
    assert_eq!(task["createdAt"], task["updatedAt"]);
}

#[tokio::test]
async fn list_returns_tasks_newest_first() {
    let app = test_app();
    for title in ["first", "second", "third"] {
        create(&app, title).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn patch_updates_completed_and_refreshes_updated_at() {
    let app = test_app();
    let task = create(&app, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    tokio::time::sleep(Duration::from_millis(2)).await;
    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["completed"], true);
    assert_eq!(patched["createdAt"], task["createdAt"]);

    let before: DateTime<Utc> = task["updatedAt"].as_str().unwrap().parse().unwrap();
    let after: DateTime<Utc> = patched["updatedAt"].as_str().unwrap().parse().unwrap();
    assert!(after > before);

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed[0]["completed"], true);
}

#[tokio::test]
async fn patch_cannot_overwrite_immutable_fields() {
    let app = test_app();
    let task = create(&app, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({
            "id": "99999999-9999-9999-9999-999999999999",
            "createdAt": "1970-01-01T00:00:00Z",
            "completed": true,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["id"], task["id"]);
    assert_eq!(patched["createdAt"], task["createdAt"]);
    assert_eq!(patched["completed"], true);
}

#[tokio::test]
async fn patch_unknown_id_returns_not_found() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/tasks/99999999-9999-9999-9999-999999999999",
        Some(json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn delete_twice_fails_on_second_attempt() {
    let app = test_app();
    let task = create(&app, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn create_list_patch_delete_lifecycle() {
    let app = test_app();

    let task = create(&app, "Buy milk").await;
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["completed"], false);

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], task["id"]);

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["completed"], true);

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed[0]["completed"], true);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "status": "ok" }));

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn blank_title_rejected_by_default_policy() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "title": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title must not be blank");
}

#[tokio::test]
async fn blank_title_patch_rejected_by_default_policy() {
    let app = test_app();
    let task = create(&app, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some(json!({ "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_title_accepted_when_policy_disabled() {
    let app = app_with_policy(false);

    let (status, task) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["title"], "");
    assert_eq!(task["completed"], false);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
