//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! ストア操作は `StoreError`、スキャンは `ScanError`、ステージングファイルは
//! `StagingError` で表現し、同期サイクル全体では `SyncError` に集約する。

use std::path::PathBuf;
use thiserror::Error;

/// SQLiteのプライマリ結果コード: SQLITE_BUSY
const SQLITE_BUSY: i32 = 5;
/// SQLiteのプライマリ結果コード: SQLITE_LOCKED
const SQLITE_LOCKED: i32 = 6;

/// Store layer error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient lock contention (another writer holds the database)
    #[error("Store is locked: {0}")]
    Locked(#[source] sqlx::Error),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Retry bound exhausted on a transient condition
    #[error("Gave up after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The last error observed
        #[source]
        source: Box<StoreError>,
    },

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(String),
}

impl StoreError {
    /// リトライ対象（ロック競合）かどうか
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_lock_error(&err) {
            Self::Locked(err)
        } else {
            Self::Database(err)
        }
    }
}

/// sqlxエラーがSQLiteのロック競合を表すか判定する
///
/// 拡張結果コード（例: `SQLITE_BUSY_SNAPSHOT` = 517）は下位8bitで判定する。
pub fn is_lock_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            let by_code = db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
                .unwrap_or(false);
            by_code || is_lock_message(db_err.message())
        }
        other => is_lock_message(&other.to_string()),
    }
}

fn is_lock_message(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

/// Scan provider error type
#[derive(Debug, Error)]
pub enum ScanError {
    /// API credential is not configured
    #[error("Scan API key is not configured")]
    MissingApiKey,

    /// Transport failure
    #[error("Failed to fetch page {page}: {source}")]
    Request {
        /// Page number (1-based)
        page: u32,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("Page {page} returned HTTP {status}")]
    Status {
        /// Page number (1-based)
        page: u32,
        /// HTTP status code
        status: u16,
    },

    /// Error object returned by the provider
    #[error("Scan provider error on page {page}: {message}")]
    Api {
        /// Page number (1-based)
        page: u32,
        /// Provider message
        message: String,
    },

    /// Malformed response body
    #[error("Failed to parse page {page}: {source}")]
    Parse {
        /// Page number (1-based)
        page: u32,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Staging file error type
#[derive(Debug, Error)]
pub enum StagingError {
    /// I/O failure on the staging file
    #[error("Staging file {}: {source}", .path.display())]
    Io {
        /// Staging file path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Sync cycle error type
#[derive(Debug, Error)]
pub enum SyncError {
    /// Scan failed; nothing was staged
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Staging file could not be read or written
    #[error(transparent)]
    Staging(#[from] StagingError),

    /// Store snapshot could not be read
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias (store)
pub type StoreResult<T> = Result<T, StoreError>;
