//! scan サブコマンド
//!
//! スキャンを実行してステージングファイルに書き出します（ストアは変更しない）。

use crate::config::AppConfig;
use crate::scan::ScanSource;
use crate::sync::staging;
use clap::Args;
use std::path::PathBuf;

/// scan サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Output file (defaults to HTTPSHUFFLE_URLS_FILE)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// scan コマンドを実行
pub async fn execute(args: &ScanArgs, config: &AppConfig) -> Result<(), anyhow::Error> {
    let client = config
        .scan
        .shodan_client()
        .ok_or_else(|| anyhow::anyhow!("HTTPSHUFFLE_SHODAN_API_KEY is not set"))?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.staging_path.clone());

    let urls = client.fetch().await?;
    staging::write_lines(&output, &urls).await?;

    println!("Wrote {} URLs to {}", urls.len(), output.display());
    Ok(())
}
