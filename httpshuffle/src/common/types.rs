//! 共通型定義
//!
//! サイトレコードと同期結果のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 永続化されたサイト（エンドポイント）レコード
///
/// `url` は正規化済みで、必ず `http://` または `https://` で始まる。
/// レコードは作成後に更新されない（同一性は `id` ではなく `url`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteRecord {
    /// ストアが採番するID
    pub id: i64,
    /// 正規化済みURL
    pub url: String,
}

/// 1回の同期パスの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// 希望セットのサイズ（正規化・重複排除後）
    pub desired: usize,
    /// 追加に成功したURL数
    pub inserted: usize,
    /// 削除に成功したURL数
    pub deleted: usize,
    /// 追加に失敗したURL
    pub failed_inserts: Vec<String>,
    /// 削除に失敗したURL
    pub failed_deletes: Vec<String>,
    /// パス開始時刻
    pub started_at: DateTime<Utc>,
    /// パス終了時刻
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// 変更操作（成功分）の合計
    pub fn mutations(&self) -> usize {
        self.inserted + self.deleted
    }

    /// 失敗した操作があったか
    pub fn has_failures(&self) -> bool {
        !self.failed_inserts.is_empty() || !self.failed_deletes.is_empty()
    }
}
