//! sync サブコマンド
//!
//! ステージングファイル（または `--scan` 指定時は新しいスキャン結果）で
//! ストアを1回だけ同期します。

use crate::config::AppConfig;
use crate::sync::{Reconciler, SyncScheduler};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// sync サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Run a scan first and reconcile with its result
    #[arg(long, default_value_t = false)]
    pub scan: bool,

    /// Staging file to read (defaults to HTTPSHUFFLE_URLS_FILE)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// sync コマンドを実行
pub async fn execute(args: &SyncArgs, config: &AppConfig) -> Result<(), anyhow::Error> {
    let staging_path = args
        .file
        .clone()
        .unwrap_or_else(|| config.staging_path.clone());
    let store = super::open_store(config).await?;
    let reconciler = Reconciler::new(store).with_skip_empty(config.sync_skip_empty);

    let report = if args.scan {
        let client = config.scan.shodan_client().ok_or_else(|| {
            anyhow::anyhow!("HTTPSHUFFLE_SHODAN_API_KEY is required for --scan")
        })?;
        SyncScheduler::new(Arc::new(client), reconciler, staging_path)
            .run_cycle()
            .await?
    } else {
        reconciler.reconcile_file(&staging_path).await?
    };

    println!(
        "Synced {} URLs: {} inserted, {} deleted",
        report.desired, report.inserted, report.deleted
    );
    if report.has_failures() {
        for url in &report.failed_deletes {
            println!("  failed to delete {}", url);
        }
        for url in &report.failed_inserts {
            println!("  failed to insert {}", url);
        }
        anyhow::bail!(
            "{} operations failed",
            report.failed_deletes.len() + report.failed_inserts.len()
        );
    }
    Ok(())
}
