//! Contract Test: GET /api/system

use crate::support::{body_string, build_app, get, memory_store, BrokenStore};
use axum::http::StatusCode;
use httpshuffle::db::traits::SiteRepository;
use httpshuffle::sync::Reconciler;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn system_reports_version_and_site_count() {
    let store = memory_store().await;
    store.insert("http://a.com").await.unwrap();
    store.insert("http://b.com").await.unwrap();
    let (app, _) = build_app(store);

    let response = get(&app, "/api/system").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["pid"], std::process::id());
    assert_eq!(body["site_count"], 2);
    assert!(body["last_sync"].is_null());
}

#[tokio::test]
async fn system_exposes_last_sync_report() {
    let store = memory_store().await;
    let (app, state) = build_app(store.clone());

    let report = Reconciler::new(store)
        .reconcile(["a.com", "b.com", "a.com"])
        .await
        .unwrap();
    state.sync_status.record(report).await;

    let body: Value =
        serde_json::from_str(&body_string(get(&app, "/api/system").await).await).unwrap();
    assert_eq!(body["site_count"], 2);
    assert_eq!(body["last_sync"]["desired"], 2);
    assert_eq!(body["last_sync"]["inserted"], 2);
    assert_eq!(body["last_sync"]["deleted"], 0);
}

#[tokio::test]
async fn system_store_failure_is_json_500() {
    let (app, _) = build_app(Arc::new(BrokenStore));

    let response = get(&app, "/api/system").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Internal server error");
}
