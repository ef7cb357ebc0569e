//! 定期同期スケジューラー
//!
//! スキャン → ステージングファイル書き出し → 同期 を固定間隔で実行する。
//! ループは逐次実行のため、サイクル同士が重なることはない。

use super::{staging, Reconciler, SyncStatus};
use crate::common::error::SyncError;
use crate::common::types::SyncReport;
use crate::scan::ScanSource;
use crate::shutdown::ShutdownController;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// デフォルトの同期間隔（768時間）
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(768 * 60 * 60);

/// スキャンと同期を定期実行するスケジューラー
#[derive(Clone)]
pub struct SyncScheduler {
    source: Arc<dyn ScanSource>,
    reconciler: Reconciler,
    staging_path: PathBuf,
    interval: Duration,
    scan_on_start: bool,
    status: SyncStatus,
}

impl SyncScheduler {
    /// 新しいスケジューラーを作成
    pub fn new(
        source: Arc<dyn ScanSource>,
        reconciler: Reconciler,
        staging_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            reconciler,
            staging_path: staging_path.into(),
            interval: DEFAULT_SYNC_INTERVAL,
            scan_on_start: false,
            status: SyncStatus::default(),
        }
    }

    /// 実行間隔を設定（最小1ms）
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    /// 起動直後にも1サイクル実行するか設定
    pub fn with_scan_on_start(mut self, scan_on_start: bool) -> Self {
        self.scan_on_start = scan_on_start;
        self
    }

    /// 同期結果の公開先を設定
    pub fn with_status(mut self, status: SyncStatus) -> Self {
        self.status = status;
        self
    }

    /// 1サイクル（スキャン → 書き出し → 同期）を実行する
    ///
    /// スキャンに失敗した場合はステージングファイルに触れない。
    pub async fn run_cycle(&self) -> Result<SyncReport, SyncError> {
        let urls = self.source.fetch().await?;
        info!(
            count = urls.len(),
            path = %self.staging_path.display(),
            "Writing scan results to staging file"
        );
        staging::write_lines(&self.staging_path, &urls).await?;

        let report = self.reconciler.reconcile_file(&self.staging_path).await?;
        self.status.record(report.clone()).await;
        Ok(report)
    }

    /// バックグラウンドで定期実行を開始
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    async fn run(&self, shutdown: ShutdownController) {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.interval.as_secs(),
            scan_on_start = self.scan_on_start,
            "Sync scheduler started"
        );

        // `interval()` は初回即時にtickする
        if !self.scan_on_start {
            timer.tick().await;
        }

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    info!("Sync scheduler stopped");
                    return;
                }
                _ = timer.tick() => {}
            }

            match self.run_cycle().await {
                Ok(report) => info!(
                    inserted = report.inserted,
                    deleted = report.deleted,
                    "Sync cycle finished"
                ),
                Err(e) => error!(error = %e, "Sync cycle failed"),
            }
        }
    }
}
