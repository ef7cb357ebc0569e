//! データベースマイグレーション実行

use crate::common::error::{StoreError, StoreResult};
use sqlx::SqlitePool;

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(())` - マイグレーション成功
/// * `Err(StoreError)` - マイグレーション失敗
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    tracing::debug!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    tracing::debug!("Database migrations completed successfully");
    Ok(())
}
