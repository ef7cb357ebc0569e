//! serve サブコマンド
//!
//! リダイレクトサーバーを起動します。

use clap::{Args, FromArgMatches};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "HTTPSHUFFLE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HTTPSHUFFLE_HOST")]
    pub host: String,
}

impl ServeArgs {
    /// サブコマンド省略時の引数（環境変数とデフォルト値のみから構築）
    pub fn from_env() -> Result<Self, clap::Error> {
        let matches =
            Self::augment_args(clap::Command::new("serve")).try_get_matches_from(["serve"])?;
        Self::from_arg_matches(&matches)
    }

    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
