//! Contract Test: GET /

use crate::support::{body_string, build_app, get, memory_store};
use axum::http::{header, StatusCode};
use httpshuffle::api::{self, index::Templates};

#[tokio::test]
async fn index_renders_embedded_landing_page() {
    let (app, _) = build_app(memory_store().await);

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{}", content_type);

    let body = body_string(response).await;
    assert!(body.contains("href=\"/shuffle\""));
}

#[tokio::test]
async fn index_reads_template_directory_on_each_request() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>first</h1>").unwrap();

    let mut state = httpshuffle::AppState::new(memory_store().await);
    state.templates = Templates::Directory(dir.path().to_path_buf());
    let app = api::create_app(state);

    assert_eq!(body_string(get(&app, "/").await).await, "<h1>first</h1>");

    std::fs::write(dir.path().join("index.html"), "<h1>second</h1>").unwrap();
    assert_eq!(body_string(get(&app, "/").await).await, "<h1>second</h1>");
}

#[tokio::test]
async fn index_returns_500_when_template_missing() {
    let dir = tempfile::tempdir().unwrap();

    let mut state = httpshuffle::AppState::new(memory_store().await);
    state.templates = Templates::Directory(dir.path().join("missing"));
    let app = api::create_app(state);

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Failed to load template");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _) = build_app(memory_store().await);
    assert_eq!(get(&app, "/nope").await.status(), StatusCode::NOT_FOUND);
}
