//! ステージングファイル
//!
//! スキャン結果を1行1URLで書き出し、同期処理の入力として読み戻す。
//! スキャン周期と同期周期を分離し、プロセス再起動後も残る。

use crate::common::error::StagingError;
use std::path::Path;

/// URL一覧をファイルへ書き出す（既存内容は上書き）
pub async fn write_lines(path: &Path, urls: &[String]) -> Result<(), StagingError> {
    let mut content = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
    for url in urls {
        content.push_str(url);
        content.push('\n');
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|source| StagingError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// ファイルから全行を読み込む
pub async fn read_lines(path: &Path) -> Result<Vec<String>, StagingError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StagingError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(content.lines().map(str::to_string).collect())
}
