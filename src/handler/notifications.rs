// handler/notifications.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt,
    dtos::common::ApiResponse,
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/user/:user_id", get(get_notifications_by_user))
        .route("/:notification_id/read", put(mark_notification_read))
}

pub async fn get_notifications_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .store
        .get_notifications_by_user(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Notifications retrieved successfully",
        notifications,
    )))
}

pub async fn mark_notification_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notification = app_state
        .store
        .mark_notification_read(notification_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            HttpError::not_found(format!("Notification {} not found", notification_id))
        })?;

    Ok(Json(ApiResponse::success(
        "Notification marked as read",
        notification,
    )))
}
