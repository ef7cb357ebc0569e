//! Integration Test: staging file → Reconciler → SQLite store

use crate::support::{file_db_url, file_store, stored_urls, TEST_LOCK};
use httpshuffle::common::error::SyncError;
use httpshuffle::db::retry::RetryPolicy;
use httpshuffle::db::sites::SiteStore;
use httpshuffle::db::traits::SiteRepository;
use httpshuffle::sync::{staging, Reconciler};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn reconcile_file_converges_store_to_staging_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&file_db_url(dir.path())).await;
    store.insert("http://stale.example:80").await.unwrap();
    store.insert("http://keep.example:80").await.unwrap();

    let staging_path = dir.path().join("urls.txt");
    std::fs::write(
        &staging_path,
        "keep.example:80\n\nhttps://new.example\n  http://keep.example:80  \n",
    )
    .unwrap();

    let reconciler = Reconciler::new(store.clone());
    let report = reconciler.reconcile_file(&staging_path).await.unwrap();

    assert_eq!(report.desired, 2);
    assert_eq!(report.deleted, 1);
    assert_eq!(report.inserted, 1);
    assert!(!report.has_failures());
    assert_eq!(
        stored_urls(store.as_ref()).await,
        vec!["http://keep.example:80", "https://new.example"]
    );

    // 同じ入力で2回目を実行しても変更はない
    let report = reconciler.reconcile_file(&staging_path).await.unwrap();
    assert_eq!(report.mutations(), 0);
}

#[tokio::test]
async fn store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = file_db_url(dir.path());

    let store = file_store(&url).await;
    Reconciler::new(store.clone())
        .reconcile(["a.com", "b.com"])
        .await
        .unwrap();
    store.pool().close().await;

    let reopened = file_store(&url).await;
    assert_eq!(
        stored_urls(reopened.as_ref()).await,
        vec!["http://a.com", "http://b.com"]
    );
}

#[tokio::test]
async fn missing_staging_file_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&file_db_url(dir.path())).await;
    store.insert("http://a.com").await.unwrap();

    let result = Reconciler::new(store.clone())
        .reconcile_file(&dir.path().join("absent.txt"))
        .await;

    assert!(matches!(result, Err(SyncError::Staging(_))));
    assert_eq!(stored_urls(store.as_ref()).await, vec!["http://a.com"]);
}

#[tokio::test]
async fn empty_staging_file_wipes_store_unless_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&file_db_url(dir.path())).await;
    store.insert("http://a.com").await.unwrap();
    let staging_path = dir.path().join("urls.txt");
    staging::write_lines(&staging_path, &[]).await.unwrap();

    let report = Reconciler::new(store.clone())
        .with_skip_empty(true)
        .reconcile_file(&staging_path)
        .await
        .unwrap();
    assert_eq!(report.mutations(), 0);
    assert_eq!(store.count().await.unwrap(), 1);

    let report = Reconciler::new(store.clone())
        .reconcile_file(&staging_path)
        .await
        .unwrap();
    assert_eq!(report.deleted, 1);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn writes_recover_when_competing_writer_releases_lock() {
    let _guard = TEST_LOCK.lock().await;
    let dir = tempfile::tempdir().unwrap();
    let url = file_db_url(dir.path());

    let pool = httpshuffle::db::init_db_pool(&url, Duration::ZERO)
        .await
        .unwrap();
    let store = Arc::new(
        SiteStore::new(pool).with_retry(RetryPolicy::new(5, Duration::from_millis(100))),
    );

    let blocker = httpshuffle::db::init_db_pool(&url, Duration::ZERO)
        .await
        .unwrap();
    let mut conn = blocker.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *conn)
        .await
        .unwrap();

    let release = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        sqlx::query("ROLLBACK").execute(&mut *conn).await.unwrap();
    });

    let report = Reconciler::new(store.clone())
        .reconcile(["a.com", "b.com"])
        .await
        .unwrap();
    release.await.unwrap();

    assert_eq!(report.inserted, 2);
    assert!(!report.has_failures());
    assert_eq!(
        stored_urls(store.as_ref()).await,
        vec!["http://a.com", "http://b.com"]
    );
}

#[tokio::test]
async fn exhausted_retries_are_reported_per_url() {
    let _guard = TEST_LOCK.lock().await;
    let dir = tempfile::tempdir().unwrap();
    let url = file_db_url(dir.path());

    let pool = httpshuffle::db::init_db_pool(&url, Duration::ZERO)
        .await
        .unwrap();
    let store = Arc::new(
        SiteStore::new(pool).with_retry(RetryPolicy::new(3, Duration::from_millis(10))),
    );

    let blocker = httpshuffle::db::init_db_pool(&url, Duration::ZERO)
        .await
        .unwrap();
    let mut conn = blocker.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *conn)
        .await
        .unwrap();

    let report = Reconciler::new(store.clone())
        .reconcile(["a.com", "b.com"])
        .await
        .unwrap();

    // 各URLが個別に失敗として記録され、パス自体は完了する
    assert_eq!(report.inserted, 0);
    assert_eq!(report.failed_inserts, vec!["http://a.com", "http://b.com"]);

    sqlx::query("ROLLBACK").execute(&mut *conn).await.unwrap();
    drop(conn);
    assert_eq!(store.count().await.unwrap(), 0);
}
