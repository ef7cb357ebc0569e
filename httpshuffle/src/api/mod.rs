//! REST APIハンドラー
//!
//! ランディングページ、ランダムリダイレクト、システム情報

/// エラーレスポンス
pub mod error;
/// GET /
pub mod index;
/// GET /shuffle
pub mod shuffle;
/// GET /api/system
pub mod system;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// アプリケーションのルーターを構築する
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::get_index))
        .route("/shuffle", get(shuffle::get_shuffle))
        .route("/api/system", get(system::get_system))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
