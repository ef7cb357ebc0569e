//! 共通型・エラー定義

/// エラー型定義
pub mod error;

/// コアデータ型
pub mod types;
