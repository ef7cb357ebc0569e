//! CLI module for httpshuffle
//!
//! Provides the server entry point and one-shot maintenance commands.

/// scan subcommand
pub mod scan;
/// serve subcommand
pub mod serve;
/// sync subcommand
pub mod sync;

use crate::config::AppConfig;
use crate::db::sites::SiteStore;
use clap::{Parser, Subcommand};
use std::sync::Arc;

/// httpshuffle - Redirects visitors to a random scanned SimpleHTTPServer
#[derive(Parser, Debug)]
#[command(name = "httpshuffle")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HTTPSHUFFLE_HOST                Bind address (default: 0.0.0.0)
    HTTPSHUFFLE_PORT                Listen port (default: 8080)
    HTTPSHUFFLE_LOG_LEVEL           Log level (default: info)
    HTTPSHUFFLE_LOG_DIR             Write daily rolling log files to this directory
    HTTPSHUFFLE_DATABASE_URL        Database URL (default: sqlite:data/httpshuffle.db)
    HTTPSHUFFLE_URLS_FILE           Staging file (default: urls.txt)
    HTTPSHUFFLE_SHODAN_API_KEY      Shodan API key (fallback: SHODAN_API_KEY)
    HTTPSHUFFLE_SCAN_INTERVAL_SECS  Scan interval (default: 2764800, 768h)
    HTTPSHUFFLE_SCAN_ON_START       Run a scan immediately after startup
    HTTPSHUFFLE_SYNC_SKIP_EMPTY     Skip syncs whose scan result is empty
    HTTPSHUFFLE_TEMPLATE_DIR        Serve index.html from this directory
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the redirect server (default)
    Serve(serve::ServeArgs),
    /// Reconcile the store with the staging file once
    Sync(sync::SyncArgs),
    /// Run a scan and write the staging file without touching the store
    Scan(scan::ScanArgs),
}

/// 設定に従ってストアを開く
pub async fn open_store(config: &AppConfig) -> Result<Arc<SiteStore>, anyhow::Error> {
    let pool = crate::db::init_db_pool(&config.database_url, config.db_busy_timeout).await?;
    Ok(Arc::new(SiteStore::new(pool)))
}
