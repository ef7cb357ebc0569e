//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated or conventional variable names, and the `AppConfig` loaded
//! once at startup.

use crate::scan::shodan::{ShodanClient, DEFAULT_BASE_URL, DEFAULT_QUERY};
use crate::sync::scheduler::DEFAULT_SYNC_INTERVAL;
use std::path::PathBuf;
use std::time::Duration;

/// Get an environment variable with fallback to a secondary name
///
/// If the preferred variable name is set, returns its value.
/// If only the fallback name is set, returns its value and logs a warning.
///
/// # Arguments
/// * `new_name` - The preferred environment variable name
/// * `old_name` - The fallback environment variable name
///
/// # Example
/// ```
/// use httpshuffle::config::get_env_with_fallback;
///
/// let key = get_env_with_fallback("HTTPSHUFFLE_SHODAN_API_KEY", "SHODAN_API_KEY");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is used as a fallback, prefer '{}'",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable or a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// Returns `default` if the variable is unset or parsing fails.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Get a non-blank environment variable as a path
pub fn get_env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Get a boolean flag (`true/1/yes/on`)
pub fn get_env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// スキャン設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// APIキー（未設定なら定期スキャンを行わない）
    pub api_key: Option<String>,
    /// APIベースURL
    pub base_url: String,
    /// 検索クエリ
    pub query: String,
    /// 取得ページ数の上限
    pub max_pages: Option<u32>,
    /// スキャン間隔
    pub interval: Duration,
    /// 起動直後にもスキャンするか
    pub scan_on_start: bool,
}

impl ScanConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        let api_key = get_env_with_fallback("HTTPSHUFFLE_SHODAN_API_KEY", "SHODAN_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let max_pages = get_env_parse("HTTPSHUFFLE_SCAN_MAX_PAGES", 0u32);
        let interval_secs = get_env_parse(
            "HTTPSHUFFLE_SCAN_INTERVAL_SECS",
            DEFAULT_SYNC_INTERVAL.as_secs(),
        );

        Self {
            api_key,
            base_url: get_env_or("HTTPSHUFFLE_SHODAN_BASE_URL", DEFAULT_BASE_URL),
            query: get_env_or("HTTPSHUFFLE_SCAN_QUERY", DEFAULT_QUERY),
            max_pages: (max_pages > 0).then_some(max_pages),
            interval: Duration::from_secs(interval_secs.max(1)),
            scan_on_start: get_env_flag("HTTPSHUFFLE_SCAN_ON_START"),
        }
    }

    /// 設定からShodanクライアントを作成（APIキー未設定なら `None`）
    pub fn shodan_client(&self) -> Option<ShodanClient> {
        let api_key = self.api_key.as_deref()?;
        Some(
            ShodanClient::new(api_key)
                .with_base_url(self.base_url.as_str())
                .with_query(self.query.as_str())
                .with_max_pages(self.max_pages),
        )
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite接続URL
    pub database_url: String,
    /// SQLiteのbusy_timeout（0で即時にロックエラー）
    pub db_busy_timeout: Duration,
    /// ステージングファイルのパス
    pub staging_path: PathBuf,
    /// 希望セットが空のパスをスキップするか
    pub sync_skip_empty: bool,
    /// テンプレートディレクトリ（未設定なら埋め込みテンプレート）
    pub template_dir: Option<PathBuf>,
    /// スキャン設定
    pub scan: ScanConfig,
}

impl AppConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        let busy_timeout_ms = get_env_parse("HTTPSHUFFLE_DB_BUSY_TIMEOUT_MS", 0u64);

        Self {
            database_url: get_env_with_fallback_or(
                "HTTPSHUFFLE_DATABASE_URL",
                "DATABASE_URL",
                "sqlite:data/httpshuffle.db",
            ),
            db_busy_timeout: Duration::from_millis(busy_timeout_ms),
            staging_path: PathBuf::from(get_env_or("HTTPSHUFFLE_URLS_FILE", "urls.txt")),
            sync_skip_empty: get_env_flag("HTTPSHUFFLE_SYNC_SKIP_EMPTY"),
            template_dir: get_env_path("HTTPSHUFFLE_TEMPLATE_DIR"),
            scan: ScanConfig::from_env(),
        }
    }
}
