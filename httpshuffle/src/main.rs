//! httpshuffle Server Entry Point

use clap::Parser;
use httpshuffle::api::index::Templates;
use httpshuffle::cli::{serve::ServeArgs, Cli, Commands};
use httpshuffle::config::AppConfig;
use httpshuffle::sync::{Reconciler, SyncScheduler};
use httpshuffle::{logging, server, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Some(Commands::Sync(args)) => {
            let config = AppConfig::from_env();
            if let Err(e) = httpshuffle::cli::sync::execute(&args, &config).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Scan(args)) => {
            let config = AppConfig::from_env();
            if let Err(e) = httpshuffle::cli::scan::execute(&args, &config).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve(args)) => {
            run_server(args).await;
        }
        None => {
            // No subcommand - default to serve
            match ServeArgs::from_env() {
                Ok(args) => run_server(args).await,
                Err(e) => e.exit(),
            }
        }
    }
}

async fn run_server(args: ServeArgs) {
    info!("httpshuffle v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();

    info!(database_url = %config.database_url, "Initializing storage");
    let store = match httpshuffle::cli::open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let reconciler = Reconciler::new(store.clone()).with_skip_empty(config.sync_skip_empty);

    let mut state = AppState::new(store);
    if let Some(dir) = &config.template_dir {
        info!(dir = %dir.display(), "Serving templates from directory");
        state.templates = Templates::Directory(dir.clone());
    }

    // 起動時に既存のステージングファイルで同期する
    match reconciler.reconcile_file(&config.staging_path).await {
        Ok(report) => state.sync_status.record(report).await,
        Err(e) => warn!(
            path = %config.staging_path.display(),
            error = %e,
            "Startup sync skipped"
        ),
    }

    let scheduler_handle = match config.scan.shodan_client() {
        Some(client) => {
            let scheduler =
                SyncScheduler::new(Arc::new(client), reconciler, config.staging_path.clone())
                    .with_interval(config.scan.interval)
                    .with_scan_on_start(config.scan.scan_on_start)
                    .with_status(state.sync_status.clone());
            Some(scheduler.start(state.shutdown.clone()))
        }
        None => {
            warn!("HTTPSHUFFLE_SHODAN_API_KEY is not set, periodic scanning disabled");
            None
        }
    };

    let shutdown = state.shutdown.clone();
    if let Err(e) = server::run(state, &args.bind_addr()).await {
        error!("Server error: {}", e);
        shutdown.request_shutdown();
        if let Some(handle) = scheduler_handle {
            if let Err(e) = handle.await {
                error!("Sync scheduler task failed: {}", e);
            }
        }
        std::process::exit(1);
    }

    if let Some(handle) = scheduler_handle {
        if let Err(e) = handle.await {
            error!("Sync scheduler task failed: {}", e);
        }
    }
}
