//! httpshuffle server
//!
//! スキャンで見つかった公開HTTPサーバーの一覧をSQLiteに同期し、
//! ランダムに1件へリダイレクトする。

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// スキャンプロバイダ（Shodan）クライアント
pub mod scan;

/// エンドポイント同期（正規化・差分適用・定期実行）
pub mod sync;

/// axumサーバー起動
pub mod server;

/// Shutdown controller (graceful exit and scheduler cancellation)
pub mod shutdown;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サイトストア
    pub sites: Arc<dyn db::traits::SiteRepository>,
    /// 直近の同期結果
    pub sync_status: sync::SyncStatus,
    /// ランディングページのテンプレート
    pub templates: api::index::Templates,
    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// ストアを注入してAppStateを構築する
    pub fn new(sites: Arc<dyn db::traits::SiteRepository>) -> Self {
        Self {
            sites,
            sync_status: sync::SyncStatus::default(),
            templates: api::index::Templates::Embedded,
            shutdown: shutdown::ShutdownController::default(),
        }
    }
}
