//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング。内部の詳細はログにのみ出力し、
//! レスポンス本文には固定メッセージを返す。

use crate::common::error::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub enum AppError {
    /// ランディングページのテンプレートを読み込めない
    TemplateUnavailable(String),
    /// リダイレクト先を取得できない（空、または読み取り失敗）
    NoSiteAvailable(Option<StoreError>),
    /// その他のストアエラー
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl AppError {
    /// 外部公開用のメッセージ
    pub fn external_message(&self) -> &'static str {
        match self {
            AppError::TemplateUnavailable(_) => "Failed to load template",
            AppError::NoSiteAvailable(_) => "Failed to fetch a random site",
            AppError::Store(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.external_message();
        match &self {
            AppError::TemplateUnavailable(detail) => {
                error!(detail = %detail, "Failed to load template");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            AppError::NoSiteAvailable(None) => {
                error!("No sites stored, cannot redirect");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            AppError::NoSiteAvailable(Some(err)) => {
                error!(error = %err, "Failed to fetch a random site");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            AppError::Store(err) => {
                error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
