//! Contract Test: GET /shuffle

use crate::support::{body_string, build_app, get, memory_store, BrokenStore};
use axum::http::{header, StatusCode};
use httpshuffle::db::traits::SiteRepository;
use std::collections::HashSet;
use std::sync::Arc;

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing Location header")
        .to_string()
}

#[tokio::test]
async fn shuffle_redirects_with_see_other() {
    let store = memory_store().await;
    store.insert("http://1.2.3.4:8000").await.unwrap();
    let (app, _) = build_app(store);

    let response = get(&app, "/shuffle").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "http://1.2.3.4:8000");
}

#[tokio::test]
async fn shuffle_eventually_visits_every_site() {
    let store = memory_store().await;
    let urls = ["http://a.com", "http://b.com", "https://c.com:8443"];
    for url in urls {
        store.insert(url).await.unwrap();
    }
    let (app, _) = build_app(store);

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let response = get(&app, "/shuffle").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        seen.insert(location(&response));
        if seen.len() == urls.len() {
            break;
        }
    }
    let expected: HashSet<String> = urls.iter().map(|u| u.to_string()).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn shuffle_on_empty_store_is_500() {
    let (app, _) = build_app(memory_store().await);

    let response = get(&app, "/shuffle").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(body_string(response).await, "Failed to fetch a random site");
}

#[tokio::test]
async fn shuffle_on_store_failure_is_500_without_details() {
    let (app, _) = build_app(Arc::new(BrokenStore));

    let response = get(&app, "/shuffle").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert_eq!(body, "Failed to fetch a random site");
    assert!(!body.contains("disk"));
}

#[tokio::test]
async fn shuffle_with_unencodable_url_is_500() {
    let store = memory_store().await;
    store.insert("http://1.2.3.4:8000\u{1}x").await.unwrap();
    let (app, _) = build_app(store);

    let response = get(&app, "/shuffle").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(body_string(response).await, "Failed to fetch a random site");
}
