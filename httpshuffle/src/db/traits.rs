//! Repository traitパターン定義
//!
//! ストア操作を抽象化し、同期処理とHTTP層にハンドルを注入できるようにする。

use async_trait::async_trait;

use crate::common::error::StoreResult;
use crate::common::types::SiteRecord;

/// サイトテーブル操作のRepository trait
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// 全レコードを取得
    async fn read_all(&self) -> StoreResult<Vec<SiteRecord>>;
    /// URLを1件追加（重複チェックは呼び出し側の責務）
    async fn insert(&self, url: &str) -> StoreResult<()>;
    /// URLが完全一致するレコードをすべて削除し、削除件数を返す
    async fn delete(&self, url: &str) -> StoreResult<u64>;
    /// ランダムに1件のURLを取得（空なら `None`）
    async fn pick_random(&self) -> StoreResult<Option<String>>;
    /// レコード件数を取得
    async fn count(&self) -> StoreResult<i64>;
}
