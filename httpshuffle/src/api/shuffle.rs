//! ランダムリダイレクト

use super::error::AppError;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// GET /shuffle
///
/// ストアからランダムに1件選び、303 See Other でリダイレクトする。
/// 保存済みURLはヘッダー値として使えるとは限らないため、変換に失敗した
/// 場合は500を返す。
pub async fn get_shuffle(State(state): State<AppState>) -> Result<Response, AppError> {
    let url = match state.sites.pick_random().await {
        Ok(Some(url)) => url,
        Ok(None) => return Err(AppError::NoSiteAvailable(None)),
        Err(e) => return Err(AppError::NoSiteAvailable(Some(e))),
    };

    let location = HeaderValue::from_str(&url).map_err(|e| {
        error!(url = ?url, error = %e, "Stored url is not a valid Location header");
        AppError::NoSiteAvailable(None)
    })?;

    debug!(url = %url, "Redirecting to random site");
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}
