//! URL正規化
//!
//! スキャン結果の生文字列を比較可能な形にそろえる。ホストやポートの
//! 妥当性は検証しない。

use std::collections::BTreeSet;

/// スキームが付いていない場合に補うプレフィックス
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// 生のエンドポイント文字列を正規化する
///
/// 前後の空白を除去し、`http://` / `https://` で始まらなければ `http://` を付ける。
/// 空文字列の除外は呼び出し側（[`desired_set`]）の責務。
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    }
}

/// 行の列から希望セットを構築する
///
/// 空白のみの行は捨て、重複は集合への挿入で畳み込まれる。
pub fn desired_set<I, S>(lines: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| normalize_url(line.as_ref()))
        .collect()
}
