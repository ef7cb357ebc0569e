//! 統合テスト共通ユーティリティ

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use httpshuffle::common::error::{StoreError, StoreResult};
use httpshuffle::common::types::SiteRecord;
use httpshuffle::db::sites::SiteStore;
use httpshuffle::db::traits::SiteRepository;
use httpshuffle::{api, AppState};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as TokioMutex;
use tower::ServiceExt;

/// ファイルロックを扱うテストを直列化するためのロック
pub static TEST_LOCK: Lazy<TokioMutex<()>> = Lazy::new(|| TokioMutex::new(()));

/// インメモリDBのストアを作成する
pub async fn memory_store() -> Arc<SiteStore> {
    let pool = httpshuffle::db::init_db_pool("sqlite::memory:", Duration::ZERO)
        .await
        .expect("Failed to create test database");
    Arc::new(SiteStore::new(pool))
}

/// 指定ディレクトリ配下のファイルDBのURL
pub fn file_db_url(dir: &Path) -> String {
    format!("sqlite:{}", dir.join("httpshuffle.db").display())
}

/// ファイルDBのストアを作成する
pub async fn file_store(url: &str) -> Arc<SiteStore> {
    let pool = httpshuffle::db::init_db_pool(url, Duration::ZERO)
        .await
        .expect("Failed to create test database");
    Arc::new(SiteStore::new(pool))
}

/// ストアの全URLを取得する（id順）
pub async fn stored_urls(store: &dyn SiteRepository) -> Vec<String> {
    store
        .read_all()
        .await
        .expect("read_all failed")
        .into_iter()
        .map(|r| r.url)
        .collect()
}

/// テスト用アプリを構築する
pub fn build_app(sites: Arc<dyn SiteRepository>) -> (Router, AppState) {
    let state = AppState::new(sites);
    (api::create_app(state.clone()), state)
}

/// GETリクエストを1件送信する
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// レスポンス本文を文字列で取得する
pub async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// すべての操作が失敗するストア
pub struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Database(sqlx::Error::Protocol("disk I/O error".to_string()))
}

#[async_trait]
impl SiteRepository for BrokenStore {
    async fn read_all(&self) -> StoreResult<Vec<SiteRecord>> {
        Err(broken())
    }
    async fn insert(&self, _url: &str) -> StoreResult<()> {
        Err(broken())
    }
    async fn delete(&self, _url: &str) -> StoreResult<u64> {
        Err(broken())
    }
    async fn pick_random(&self) -> StoreResult<Option<String>> {
        Err(broken())
    }
    async fn count(&self) -> StoreResult<i64> {
        Err(broken())
    }
}
