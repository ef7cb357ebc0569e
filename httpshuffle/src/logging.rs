//! ロギング初期化
//!
//! 標準出力へのfmtレイヤーに加え、`HTTPSHUFFLE_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイル出力を追加する。

use crate::config::{get_env_path, get_env_with_fallback_or};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// デフォルトのログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "httpshuffle.log";

/// ログフィルタ文字列を取得（`HTTPSHUFFLE_LOG_LEVEL` → `RUST_LOG` → `info`）
pub fn filter_directive() -> String {
    get_env_with_fallback_or("HTTPSHUFFLE_LOG_LEVEL", "RUST_LOG", DEFAULT_LOG_LEVEL)
}

/// ログファイルの出力先ディレクトリ
pub fn log_dir() -> Option<PathBuf> {
    get_env_path("HTTPSHUFFLE_LOG_DIR")
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルなtracingサブスクライバーを初期化する
///
/// 2回目以降の呼び出しはエラーを返す。
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let directive = filter_directive();

    let file_layer = log_dir().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_filter(build_filter(&directive))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_filter(build_filter(&directive)))
        .with(file_layer)
        .try_init()
}
