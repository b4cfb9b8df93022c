//! Fetch-based client for the task API.
//!
//! Failures collapse to a `String` the caller logs to the console; when the
//! server responded with an `{"error": ...}` body, that message is used.

use shared::{CreateTaskRequest, Task, UpdateTaskRequest};
use uuid::Uuid;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub async fn fetch_tasks() -> Result<Vec<Task>, String> {
    let text = send("GET", "/api/tasks", None).await?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse task list: {e}"))
}

pub async fn create_task(title: String) -> Result<Task, String> {
    let body = CreateTaskRequest {
        title,
        description: None,
    };
    let body = serde_json::to_string(&body).map_err(|e| format!("Failed to encode request: {e}"))?;

    let text = send("POST", "/api/tasks", Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse created task: {e}"))
}

pub async fn update_task(id: Uuid, patch: UpdateTaskRequest) -> Result<Task, String> {
    let body =
        serde_json::to_string(&patch).map_err(|e| format!("Failed to encode request: {e}"))?;

    let text = send("PATCH", &format!("/api/tasks/{id}"), Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse updated task: {e}"))
}

pub async fn delete_task(id: Uuid) -> Result<(), String> {
    send("DELETE", &format!("/api/tasks/{id}"), None).await?;
    Ok(())
}

/// Issue one request and return the response body text, mapping non-2xx
/// responses to the server's error message.
async fn send(method: &str, url: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(body));
    }

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|_| "Failed to create request")?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| "Failed to set header")?;
    }

    let window = web_sys::window().ok_or("No window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Failed to send request")?
        .into();

    let text_promise = response.text().map_err(|_| "Failed to read response")?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "Failed to read response")?
        .as_string()
        .ok_or("Failed to read response")?;

    if !response.ok() {
        return Err(error_message(&text, response.status()));
    }
    Ok(text)
}

fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
