//! System API (version and sync status).

use super::error::AppError;
use crate::common::types::SyncReport;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// GET /api/system のレスポンス
#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    /// パッケージバージョン
    pub version: String,
    /// プロセスID
    pub pid: u32,
    /// 保存されているサイト数
    pub site_count: i64,
    /// 直近の同期結果
    pub last_sync: Option<SyncReport>,
}

/// GET /api/system
pub async fn get_system(
    State(state): State<AppState>,
) -> Result<Json<SystemInfoResponse>, AppError> {
    let site_count = state.sites.count().await?;
    Ok(Json(SystemInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        pid: std::process::id(),
        site_count,
        last_sync: state.sync_status.last().await,
    }))
}
