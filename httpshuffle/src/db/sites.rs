//! サイトテーブル操作
//!
//! `sites` テーブル（id, url）の読み書き。書き込み系は
//! [`RetryPolicy`] でロック競合を吸収する。

use super::retry::RetryPolicy;
use super::traits::SiteRepository;
use crate::common::error::{StoreError, StoreResult};
use crate::common::types::SiteRecord;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// SQLiteベースのサイトストア
#[derive(Clone)]
pub struct SiteStore {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl SiteStore {
    /// デフォルトのリトライポリシーでストアを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }

    /// リトライポリシーを設定
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 接続プールへの参照
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SiteRepository for SiteStore {
    async fn read_all(&self) -> StoreResult<Vec<SiteRecord>> {
        let rows = sqlx::query_as::<_, SiteRecord>("SELECT id, url FROM sites ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, url: &str) -> StoreResult<()> {
        let pool = &self.pool;
        self.retry
            .run("insert", url, move || async move {
                sqlx::query("INSERT INTO sites (url) VALUES (?)")
                    .bind(url)
                    .execute(pool)
                    .await?;
                Ok::<_, StoreError>(())
            })
            .await
    }

    async fn delete(&self, url: &str) -> StoreResult<u64> {
        let pool = &self.pool;
        self.retry
            .run("delete", url, move || async move {
                let result = sqlx::query("DELETE FROM sites WHERE url = ?")
                    .bind(url)
                    .execute(pool)
                    .await?;
                Ok::<_, StoreError>(result.rows_affected())
            })
            .await
    }

    async fn pick_random(&self) -> StoreResult<Option<String>> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT url FROM sites ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sites")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
