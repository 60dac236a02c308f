//! The nine demo operations.
//!
//! Each operation builds one descriptor (two for the concurrent fetch),
//! executes it, and hands the envelope to the render sink. Failures are
//! caught locally and logged; no operation retries and none propagates an
//! error to its caller.

use std::time::Duration;

use request_core::{ApiClient, ClientError, RequestDescriptor};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::render::Render;

/// GET /todos.
pub async fn fetch_all(client: &ApiClient, out: &mut dyn Render) {
    match client.execute(RequestDescriptor::get("/todos")).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "fetch all failed"),
    }
}

/// POST /todos.
pub async fn create(client: &ApiClient, out: &mut dyn Render) {
    let descriptor = RequestDescriptor::post("/todos").body(json!({
        "title": "New Todo",
        "completed": false,
    }));
    match client.execute(descriptor).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "create failed"),
    }
}

/// PATCH /todos/1.
pub async fn update(client: &ApiClient, out: &mut dyn Render) {
    let descriptor = RequestDescriptor::patch("/todos/1").body(json!({
        "title": "Updated Todo",
        "completed": true,
    }));
    match client.execute(descriptor).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "update failed"),
    }
}

/// DELETE /todos/1.
pub async fn remove(client: &ApiClient, out: &mut dyn Render) {
    match client.execute(RequestDescriptor::delete("/todos/1")).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "remove failed"),
    }
}

/// GET /todos and GET /posts in parallel. Renders todos first, then posts,
/// regardless of which reply lands first; renders nothing if either fails.
pub async fn fetch_concurrent(client: &ApiClient, out: &mut dyn Render) {
    let todos = client.execute(RequestDescriptor::get("/todos"));
    let posts = client.execute(RequestDescriptor::get("/posts"));
    match tokio::try_join!(todos, posts) {
        Ok((todos, posts)) => {
            out.render(&todos);
            out.render(&posts);
        }
        Err(error) => tracing::error!(%error, "concurrent fetch failed"),
    }
}

/// POST /todos with an explicit Content-Type and bearer Authorization.
pub async fn create_with_headers(client: &ApiClient, out: &mut dyn Render) {
    let descriptor = RequestDescriptor::post("/todos")
        .header("Content-Type", "application/json")
        .header("Authorization", "Bearer token123")
        .body(json!({
            "title": "New Todo",
            "completed": false,
        }));
    match client.execute(descriptor).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "create with headers failed"),
    }
}

/// GET /todos/1 with the title upper-cased after default decoding.
pub async fn fetch_with_transform(client: &ApiClient, out: &mut dyn Render) {
    let descriptor = RequestDescriptor::get("/todos/1").transform(uppercase_title);
    match client.execute(descriptor).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => tracing::error!(%error, "fetch with transform failed"),
    }
}

/// GET /todos; any failure is reported through the category taxonomy.
pub async fn fetch_with_error_classification(client: &ApiClient, out: &mut dyn Render) {
    match client.execute(RequestDescriptor::get("/todos")).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) => log_classified(&error),
    }
}

/// GET /todos with a cancellation token that a 100ms timer fires
/// unconditionally. If the reply lands first, the late cancel is a no-op.
pub async fn fetch_cancelable(client: &ApiClient, out: &mut dyn Render) {
    cancelable_fetch(client, "/todos", out).await
}

async fn cancelable_fetch(client: &ApiClient, path: &str, out: &mut dyn Render) {
    let token = CancellationToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        timer.cancel();
    });

    match client.execute(RequestDescriptor::get(path).cancel(token)).await {
        Ok(envelope) => out.render(&envelope),
        Err(error) if error.is_canceled() => tracing::warn!("Request canceled"),
        Err(error) => tracing::error!(%error, "cancelable fetch failed"),
    }
}

/// Upper-case the `title` field of an already-decoded body.
fn uppercase_title(mut body: Value) -> Value {
    let title = body.get("title").and_then(Value::as_str).map(str::to_uppercase);
    if let Some(title) = title {
        body["title"] = Value::String(title);
    }
    body
}

/// Report one failure through the matched category, in priority order:
/// server replied, nothing came back, never left the client.
fn log_classified(error: &ClientError) {
    match error {
        ClientError::Status {
            status,
            headers,
            body,
        } => {
            tracing::error!(status, ?headers, %body, "server rejected the request");
        }
        ClientError::NoResponse { descriptor, .. } => {
            tracing::error!(?descriptor, "request went out but no response arrived");
        }
        ClientError::Setup(message) => {
            tracing::error!(%message, "request never left the client");
        }
        ClientError::Canceled => tracing::warn!("Request canceled"),
    }
}
