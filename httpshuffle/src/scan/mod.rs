//! スキャンプロバイダ
//!
//! 公開エンドポイントの一覧を外部サービスから取得する。

/// Shodan検索APIクライアント
pub mod shodan;

pub use shodan::ShodanClient;

use crate::common::error::ScanError;
use async_trait::async_trait;

/// エンドポイント一覧の取得元
///
/// 取得は全件か失敗のどちらかで、途中までの一覧は返さない。
#[async_trait]
pub trait ScanSource: Send + Sync {
    /// 正規化前のURL一覧を取得する
    async fn fetch(&self) -> Result<Vec<String>, ScanError>;
}
