// handler/stats.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{dtos::common::ApiResponse, error::HttpError, AppState};

pub fn stats_handler() -> Router {
    Router::new().route("/counts", get(get_counts))
}

pub async fn get_counts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let counts = app_state.report_service.table_counts().await?;

    Ok(Json(ApiResponse::success(
        "Table counts retrieved successfully",
        counts,
    )))
}
