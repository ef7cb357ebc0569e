//! エンドポイント同期モジュール
//!
//! スキャン結果（希望セット）とストアの内容を突き合わせ、
//! 差分だけを削除→追加の順で適用する。

pub mod normalize;
pub mod scheduler;
pub mod staging;

pub use normalize::{desired_set, normalize_url};
pub use scheduler::SyncScheduler;

use crate::common::error::{StoreResult, SyncError};
use crate::common::types::{SiteRecord, SyncReport};
use crate::db::traits::SiteRepository;
use chrono::Utc;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// 希望セットとスナップショットの差分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// 削除するURL（スナップショットにあり、希望セットにない）
    pub to_delete: Vec<String>,
    /// 追加するURL（希望セットにあり、スナップショットにない）
    pub to_insert: Vec<String>,
}

impl SyncPlan {
    /// 変更が不要か
    pub fn is_noop(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty()
    }
}

/// 希望セットとストアのスナップショットから差分を計算する
///
/// スナップショット内で重複しているURLは1回だけ削除対象になる
/// （削除は一致する全行を消すため）。
pub fn plan(desired: &BTreeSet<String>, snapshot: &[SiteRecord]) -> SyncPlan {
    let existing: BTreeSet<&str> = snapshot.iter().map(|r| r.url.as_str()).collect();

    let mut to_delete = Vec::new();
    for url in &existing {
        if !desired.contains(*url) {
            to_delete.push((*url).to_string());
        }
    }

    let mut to_insert = Vec::new();
    for url in desired {
        if !existing.contains(url.as_str()) {
            to_insert.push(url.clone());
        }
    }

    SyncPlan {
        to_delete,
        to_insert,
    }
}

/// 直近の同期結果（HTTP層から参照）
#[derive(Clone, Debug, Default)]
pub struct SyncStatus {
    last: Arc<RwLock<Option<SyncReport>>>,
}

impl SyncStatus {
    /// 同期結果を記録
    pub async fn record(&self, report: SyncReport) {
        *self.last.write().await = Some(report);
    }

    /// 直近の同期結果を取得
    pub async fn last(&self) -> Option<SyncReport> {
        self.last.read().await.clone()
    }
}

/// ストアを希望セットに一致させる同期処理
///
/// パスをまたいだ状態は持たない。各パスは新しく読んだスナップショットから始まる。
#[derive(Clone)]
pub struct Reconciler {
    sites: Arc<dyn SiteRepository>,
    skip_empty: bool,
}

impl Reconciler {
    /// ストアを注入して作成
    pub fn new(sites: Arc<dyn SiteRepository>) -> Self {
        Self {
            sites,
            skip_empty: false,
        }
    }

    /// 希望セットが空のパスを削除せずにスキップするか設定
    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// 生の行を正規化してストアと同期する
    ///
    /// # 処理フロー
    /// 1. 空行を除いて正規化し、希望セットを構築
    /// 2. ストアの全件を読み込む（失敗したらパス全体を中断）
    /// 3. 希望セットにないURLを削除（個別の失敗は記録して続行）
    /// 4. ストアにないURLを追加（個別の失敗は記録して続行）
    ///
    /// 適用後の再読み込みは行わない。
    pub async fn reconcile<I, S>(&self, lines: I) -> StoreResult<SyncReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let desired = desired_set(lines);
        self.reconcile_set(desired).await
    }

    /// ステージングファイルを読み込んで同期する
    pub async fn reconcile_file(&self, path: &Path) -> Result<SyncReport, SyncError> {
        info!(path = %path.display(), "Reading URLs from staging file");
        let lines = staging::read_lines(path).await?;
        Ok(self.reconcile(lines).await?)
    }

    async fn reconcile_set(&self, desired: BTreeSet<String>) -> StoreResult<SyncReport> {
        let started_at = Utc::now();

        if desired.is_empty() {
            if self.skip_empty {
                warn!("Desired set is empty, skipping reconciliation");
                return Ok(SyncReport {
                    desired: 0,
                    inserted: 0,
                    deleted: 0,
                    failed_inserts: Vec::new(),
                    failed_deletes: Vec::new(),
                    started_at,
                    finished_at: Utc::now(),
                });
            }
            warn!("Desired set is empty, every stored URL will be deleted");
        }

        for url in &desired {
            debug!(url = %url, "URL from scan");
        }

        info!("Fetching URLs from database");
        let snapshot = self.sites.read_all().await.map_err(|e| {
            error!(error = %e, "Failed to read store snapshot, aborting reconciliation");
            e
        })?;
        for record in &snapshot {
            debug!(id = record.id, url = %record.url, "URL from database");
        }

        let plan = plan(&desired, &snapshot);

        let mut deleted = 0;
        let mut failed_deletes = Vec::new();
        for url in plan.to_delete {
            info!(url = %url, "Deleting URL from database");
            match self.sites.delete(&url).await {
                Ok(_) => deleted += 1,
                Err(e) => {
                    error!(url = %url, error = %e, "Failed to delete URL");
                    failed_deletes.push(url);
                }
            }
        }

        let mut inserted = 0;
        let mut failed_inserts = Vec::new();
        for url in plan.to_insert {
            info!(url = %url, "Inserting new URL into database");
            match self.sites.insert(&url).await {
                Ok(()) => inserted += 1,
                Err(e) => {
                    error!(url = %url, error = %e, "Failed to insert URL");
                    failed_inserts.push(url);
                }
            }
        }

        let report = SyncReport {
            desired: desired.len(),
            inserted,
            deleted,
            failed_inserts,
            failed_deletes,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            desired = report.desired,
            inserted = report.inserted,
            deleted = report.deleted,
            failed_inserts = report.failed_inserts.len(),
            failed_deletes = report.failed_deletes.len(),
            "Database update complete"
        );

        Ok(report)
    }
}
