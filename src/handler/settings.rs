// handler/settings.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::common::{ApiResponse, DataAccessInfo},
    error::HttpError,
    AppState,
};

pub fn settings_handler() -> Router {
    Router::new().route("/data-access", get(get_data_access))
}

/// The data-access strategy is fixed per deployment; this endpoint only
/// reports which one is active.
pub async fn get_data_access(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(ApiResponse::success(
        "Active data access strategy",
        DataAccessInfo {
            data_access: app_state.env.data_access.as_str(),
        },
    )))
}
