//! HTTP tests for the hxtodo router.
//!
//! Each test builds the full router (layers included) over an in-memory or
//! failing record store with sequential ids, so the first todo created is
//! always `00000000000000000001`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use hxtodo::{AppState, build_router};
use hxtodo_core::{MemoryRecordStore, RecordKey, TodoRepository};
use hxtodo_testing::{
    FailingRecordStore, failing_repository, init_test_tracing, memory_repository, sequential_id,
};
use hxtodo_web::{CORRELATION_ID_HEADER, TRIGGER_AFTER_SWAP_HEADER};

const ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../public");

fn server_for(repo: TodoRepository) -> TestServer {
    init_test_tracing();
    TestServer::new(build_router(AppState::new(repo), ASSETS_DIR)).expect("test server")
}

fn memory_server() -> (MemoryRecordStore, TestServer) {
    let (store, repo) = memory_repository();
    (store, server_for(repo))
}

fn failing_server() -> (FailingRecordStore, TestServer) {
    let (store, repo) = failing_repository();
    (store, server_for(repo))
}

fn trigger(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get(TRIGGER_AFTER_SWAP_HEADER)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn stored_text(store: &MemoryRecordStore, id: &str) -> Option<String> {
    use hxtodo_core::RecordStore;
    let raw = store.get(&RecordKey::new("todo", id)).await.unwrap()?;
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    Some(value["text"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_empty_page() {
    let (_store, server) = memory_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<ul id="todo-list"></ul>"#));
    assert!(html.contains(r#"hx-post="/todo""#));
    assert!(trigger(&response).is_none());
}

#[tokio::test]
async fn test_create_returns_item_and_requests_focus() {
    let (store, server) = memory_server();

    let response = server.post("/todo").form(&[("text", "Buy milk")]).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(trigger(&response).as_deref(), Some("requestFocus"));
    let html = response.text();
    assert!(html.starts_with(r#"<div class="m-2" id="todo00000000000000000001">"#));
    assert!(html.contains("<span>Buy milk</span>"));

    assert_eq!(
        stored_text(&store, "00000000000000000001").await.as_deref(),
        Some("Buy milk")
    );
}

#[tokio::test]
async fn test_created_todo_is_listed_first() {
    let (_store, server) = memory_server();

    server.post("/todo").form(&[("text", "Walk dog")]).await;
    server.post("/todo").form(&[("text", "Buy milk")]).await;

    let html = server.get("/").await.text();
    let newest = html.find("<span>Buy milk</span>").unwrap();
    let oldest = html.find("<span>Walk dog</span>").unwrap();
    assert!(newest < oldest);
}

#[tokio::test]
async fn test_page_shows_at_most_thirty() {
    let (_store, server) = memory_server();

    for i in 0..35 {
        server.post("/todo").form(&[("text", format!("todo {i}"))]).await;
    }

    let html = server.get("/").await.text();
    assert_eq!(html.matches(r#"class="m-2""#).count(), 30);
    assert!(html.contains("<span>todo 34</span>"));
    assert!(!html.contains("<span>todo 4</span>"));
}

#[tokio::test]
async fn test_create_ignores_unknown_fields() {
    let (store, server) = memory_server();

    let response = server
        .post("/todo")
        .form(&[("text", "Buy milk"), ("id", "forged"), ("done", "true")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(stored_text(&store, "forged").await, None);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_rejects_blank_text() {
    let (store, server) = memory_server();

    for text in ["", "   "] {
        let response = server.post("/todo").form(&[("text", text)]).await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(trigger(&response).is_none());
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let missing = server.post("/todo").form(&[("other", "x")]).await;
    assert_eq!(missing.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_reset_form_is_create_mode() {
    let (_store, server) = memory_server();

    let response = server.get("/todo/reset-form").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(trigger(&response).is_none());
    let html = response.text();
    assert!(html.starts_with(r#"<form id="todo-form""#));
    assert!(html.contains(r#"hx-post="/todo""#));
    assert!(html.contains(">Add</button>"));
}

#[tokio::test]
async fn test_update_then_edit_shows_new_text() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;
    let id = sequential_id(1);

    let updated = server
        .put(&format!("/todo/{id}"))
        .form(&[("text", "B")])
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(trigger(&updated).as_deref(), Some("resetForm"));
    assert!(updated.text().contains("<span>B</span>"));

    let edit = server.get(&format!("/todo/{id}")).await;
    assert_eq!(edit.status_code(), StatusCode::OK);
    assert_eq!(trigger(&edit).as_deref(), Some("requestFocus"));
    let html = edit.text();
    assert!(html.contains(r#"value="B""#));
    assert!(html.contains(&format!(r#"hx-put="/todo/{id}""#)));
    assert!(html.contains(">Update</button>"));

    assert_eq!(stored_text(&store, id.as_str()).await.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_update_missing_echoes_without_persisting() {
    let (store, server) = memory_server();

    let response = server.put("/todo/ghost").form(&[("text", "Boo")]).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(trigger(&response).as_deref(), Some("resetForm"));
    let html = response.text();
    assert!(html.contains(r#"id="todoghost""#));
    assert!(html.contains("<span>Boo</span>"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_update_rejects_blank_text() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;

    let response = server
        .put(&format!("/todo/{}", sequential_id(1)))
        .form(&[("text", " ")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(trigger(&response).is_none());
    assert_eq!(
        stored_text(&store, sequential_id(1).as_str()).await.as_deref(),
        Some("A")
    );
}

#[tokio::test]
async fn test_edit_missing_gives_empty_form_bound_to_id() {
    let (_store, server) = memory_server();

    let response = server.get("/todo/ghost").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(trigger(&response).as_deref(), Some("requestFocus"));
    let html = response.text();
    assert!(html.contains(r#"hx-put="/todo/ghost""#));
    assert!(html.contains(r#"value="""#));
}

#[tokio::test]
async fn test_ids_that_need_encoding_are_rejected() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;

    for path in ["/todo/a%3Fb%20c", "/todo/a%23b", "/todo/a%2Fb", "/todo/a.b"] {
        let edit = server.get(path).await;
        assert_eq!(edit.status_code(), StatusCode::BAD_REQUEST, "GET {path}");
        assert!(trigger(&edit).is_none());
        assert_eq!(edit.json::<serde_json::Value>()["code"], "BAD_REQUEST");

        let update = server.put(path).form(&[("text", "B")]).await;
        assert_eq!(update.status_code(), StatusCode::BAD_REQUEST, "PUT {path}");
        assert!(trigger(&update).is_none());

        let delete = server.delete(path).await;
        assert_eq!(delete.status_code(), StatusCode::BAD_REQUEST, "DELETE {path}");
        assert!(trigger(&delete).is_none());
    }

    assert_eq!(store.len().await, 1);
    assert_eq!(
        stored_text(&store, sequential_id(1).as_str()).await.as_deref(),
        Some("A")
    );
}

#[tokio::test]
async fn test_edit_form_targets_the_same_id() {
    let (_store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;
    let id = sequential_id(1);

    let html = server.get(&format!("/todo/{id}")).await.text();

    assert!(html.contains(&format!(r#"hx-put="/todo/{id}""#)));
    assert!(html.contains(&format!(r##"hx-target="#todo{id}""##)));
}

#[tokio::test]
async fn test_delete_removes_todo() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;

    let response = server.delete(&format!("/todo/{}", sequential_id(1))).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(trigger(&response).as_deref(), Some("resetForm"));
    assert!(response.text().is_empty());
    assert!(store.is_empty().await);
    assert!(!server.get("/").await.text().contains("<span>A</span>"));
}

#[tokio::test]
async fn test_delete_missing_is_noop() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "Keep me")]).await;

    let response = server.delete("/todo/never-created").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(trigger(&response).as_deref(), Some("resetForm"));
    assert!(response.text().is_empty());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_updates_last_write_wins() {
    let (store, server) = memory_server();
    server.post("/todo").form(&[("text", "A")]).await;
    let path = format!("/todo/{}", sequential_id(1));

    let (first, second) = tokio::join!(
        async { server.put(&path).form(&[("text", "left")]).await },
        async { server.put(&path).form(&[("text", "right")]).await },
    );
    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);

    let text = stored_text(&store, sequential_id(1).as_str()).await.unwrap();
    assert!(text == "left" || text == "right", "unexpected text {text:?}");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_write_failure_is_500_without_signal() {
    let (store, server) = failing_server();
    store.fail_writes(true);

    let response = server.post("/todo").form(&[("text", "Buy milk")]).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(trigger(&response).is_none());
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(store.rejected_writes(), 1);
    assert!(store.inner().is_empty().await);
}

#[tokio::test]
async fn test_read_failure_is_500() {
    let (store, server) = failing_server();
    store.fail_reads(true);

    assert_eq!(
        server.get("/").await.status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        server.get("/todo/anything").await.status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let delete = server.delete("/todo/anything").await;
    assert_eq!(delete.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(trigger(&delete).is_none());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (store, server) = failing_server();

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<serde_json::Value>()["status"], "ok");

    let ready = server.get("/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    assert_eq!(ready.json::<serde_json::Value>()["ready"], true);

    store.fail_reads(true);
    let not_ready = server.get("/ready").await;
    assert_eq!(not_ready.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(not_ready.json::<serde_json::Value>()["store"], false);
}

#[tokio::test]
async fn test_every_response_has_correlation_id() {
    let (_store, server) = memory_server();

    for response in [
        server.get("/").await,
        server.post("/todo").form(&[("text", "")]).await,
        server.get("/health").await,
    ] {
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    }
}

#[tokio::test]
async fn test_assets_are_served_with_validators() {
    let (_store, server) = memory_server();

    let response = server.get("/assets/css/style.css").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().contains_key("last-modified"));
    assert!(response.text().contains("body"));
}
