//! ランディングページ
//!
//! 埋め込みテンプレート、または設定されたディレクトリから毎回読み込んだ
//! `index.html` をそのまま返す。

use super::error::AppError;
use crate::AppState;
use axum::{extract::State, response::Html};
use include_dir::{include_dir, Dir};
use std::path::PathBuf;

static EMBEDDED_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// ランディングページのテンプレートファイル名
pub const INDEX_TEMPLATE: &str = "index.html";

/// テンプレートの取得元
#[derive(Debug, Clone, Default)]
pub enum Templates {
    /// バイナリに埋め込まれたテンプレート
    #[default]
    Embedded,
    /// ディスク上のディレクトリ（リクエストごとに読み込む）
    Directory(PathBuf),
}

impl Templates {
    /// ランディングページを読み込む
    pub async fn load_index(&self) -> Result<String, AppError> {
        match self {
            Templates::Embedded => EMBEDDED_TEMPLATES
                .get_file(INDEX_TEMPLATE)
                .and_then(|file| file.contents_utf8())
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::TemplateUnavailable(format!("embedded {} missing", INDEX_TEMPLATE))
                }),
            Templates::Directory(dir) => {
                let path = dir.join(INDEX_TEMPLATE);
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    AppError::TemplateUnavailable(format!("{}: {}", path.display(), e))
                })
            }
        }
    }
}

/// GET /
pub async fn get_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = state.templates.load_index().await?;
    Ok(Html(page))
}
