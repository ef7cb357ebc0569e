//! ロック競合時のリトライポリシー
//!
//! SQLiteは競合する書き込みを直列化し、待ちきれない場合は
//! `SQLITE_BUSY` を返す。その一過性の失敗だけを固定回数・固定間隔で
//! 再試行し、それ以外の失敗は即座に呼び出し元へ返す。

use crate::common::error::{StoreError, StoreResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// デフォルトの最大試行回数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// デフォルトの再試行間隔
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// 書き込み操作のリトライポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大試行回数（初回を含む、1以上）
    pub max_attempts: u32,
    /// 試行間の待機時間
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// 新しいポリシーを作成（試行回数は最低1回）
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// 操作を実行し、ロック競合時のみ再試行する
    ///
    /// 最終試行の後は待機しない。上限に達した場合は最後のエラーを
    /// `StoreError::RetryExhausted` に包んで返す。
    pub async fn run<T, F, Fut>(&self, operation: &str, url: &str, mut op: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => {
                    debug!(operation, url, attempt, "Store operation succeeded");
                    return Ok(value);
                }
                Err(err) if err.is_transient() => {
                    if attempt >= self.max_attempts {
                        error!(
                            operation,
                            url,
                            attempts = attempt,
                            error = %err,
                            "Store operation failed after retrying"
                        );
                        return Err(StoreError::RetryExhausted {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }
                    warn!(
                        operation,
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        "Store is locked, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => {
                    error!(operation, url, error = %err, "Store operation failed");
                    return Err(err);
                }
            }
        }
    }
}
