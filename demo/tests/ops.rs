//! Operation tests against the live mock backend.
//!
//! # Design
//! Each test starts its own mock server and records what the render sink
//! receives, so the contracts are checked at the operation boundary: what
//! gets rendered, in what order, and that failures leave the sink untouched.

use request_core::{ApiClient, ResponseEnvelope};
use request_demo::ops;
use request_demo::render::Render;

#[derive(Default)]
struct RecordingRenderer {
    envelopes: Vec<ResponseEnvelope>,
}

impl Render for RecordingRenderer {
    fn render(&mut self, envelope: &ResponseEnvelope) {
        self.envelopes.push(envelope.clone());
    }
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client bound to a port nothing listens on.
async fn unreachable_client() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ApiClient::new(&format!("http://{addr}"))
}

#[tokio::test]
async fn fetch_all_renders_the_todo_list() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::fetch_all(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    let envelope = &out.envelopes[0];
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.descriptor.path, "/todos");
    assert_eq!(envelope.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_all_failure_leaves_renderer_untouched() {
    let client = unreachable_client().await;
    let mut out = RecordingRenderer::default();

    ops::fetch_all(&client, &mut out).await;

    assert!(out.envelopes.is_empty());
}

#[tokio::test]
async fn create_renders_the_created_todo() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::create(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    let envelope = &out.envelopes[0];
    assert_eq!(envelope.status, 201);
    assert_eq!(envelope.body["title"], "New Todo");
    assert_eq!(envelope.body["completed"], false);
}

#[tokio::test]
async fn update_renders_the_patched_todo() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::update(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    let envelope = &out.envelopes[0];
    assert_eq!(envelope.body["title"], "Updated Todo");
    assert_eq!(envelope.body["completed"], true);
}

#[tokio::test]
async fn remove_renders_the_empty_reply() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::remove(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    assert_eq!(out.envelopes[0].status, 204);
    assert!(out.envelopes[0].body.is_null());
}

#[tokio::test]
async fn fetch_concurrent_renders_todos_then_posts() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::fetch_concurrent(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 2);
    assert_eq!(out.envelopes[0].descriptor.path, "/todos");
    assert_eq!(out.envelopes[1].descriptor.path, "/posts");
}

#[tokio::test]
async fn fetch_concurrent_renders_nothing_when_a_call_fails() {
    let client = unreachable_client().await;
    let mut out = RecordingRenderer::default();

    ops::fetch_concurrent(&client, &mut out).await;

    assert!(out.envelopes.is_empty());
}

#[tokio::test]
async fn create_with_headers_renders_the_created_todo() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::create_with_headers(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    let envelope = &out.envelopes[0];
    assert_eq!(envelope.status, 201);
    assert_eq!(
        envelope.descriptor.headers,
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), "Bearer token123".to_string()),
        ]
    );
}

#[tokio::test]
async fn fetch_with_transform_renders_the_uppercased_title() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::fetch_with_transform(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    assert_eq!(out.envelopes[0].body["title"], "LEARN THE CLIENT API");
}

#[tokio::test]
async fn fetch_with_error_classification_renders_on_success() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    ops::fetch_with_error_classification(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    assert_eq!(out.envelopes[0].status, 200);
}

#[tokio::test]
async fn fetch_with_error_classification_renders_nothing_on_failure() {
    let client = unreachable_client().await;
    let mut out = RecordingRenderer::default();

    ops::fetch_with_error_classification(&client, &mut out).await;

    assert!(out.envelopes.is_empty());
}

#[tokio::test]
async fn fetch_cancelable_renders_when_the_reply_wins_the_race() {
    let client = ApiClient::new(&spawn_backend().await);
    let mut out = RecordingRenderer::default();

    // The local backend answers well inside 100ms, so the late cancel is a
    // no-op and the response still reaches the sink.
    ops::fetch_cancelable(&client, &mut out).await;

    assert_eq!(out.envelopes.len(), 1);
    assert_eq!(out.envelopes[0].status, 200);
}
