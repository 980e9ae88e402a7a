// handler/categories.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::categorydb::{CategoryChanges, CategoryExt, NewCategory},
    dtos::{
        categorydtos::{CreateCategoryDto, UpdateCategoryDto},
        common::ApiResponse,
    },
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn categories_handler() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/active", get(get_active_categories))
        .route(
            "/:category_id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

pub async fn list_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .store
        .list_categories()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Service categories retrieved successfully",
        categories,
    )))
}

pub async fn create_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let base_rate = body
        .base_rate
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid base rate"))?;

    let category = app_state
        .store
        .create_category(NewCategory {
            category_name: body.category_name,
            category_description: body.category_description,
            icon_url: body.icon_url,
            base_rate,
        })
        .await
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Service category created successfully",
            category,
        )),
    ))
}

pub async fn get_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let category = app_state
        .store
        .get_category_by_id(category_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            HttpError::not_found(format!("Service category {} not found", category_id))
        })?;

    Ok(Json(ApiResponse::success(
        "Service category retrieved successfully",
        category,
    )))
}

pub async fn update_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != category_id {
        return Err(HttpError::bad_request("Service category ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let base_rate = body
        .base_rate
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid base rate"))?;

    let category = app_state
        .store
        .update_category(
            category_id,
            CategoryChanges {
                category_name: body.category_name,
                category_description: body.category_description,
                icon_url: body.icon_url,
                base_rate,
                is_active: body.is_active,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            HttpError::not_found(format!("Service category {} not found", category_id))
        })?;

    Ok(Json(ApiResponse::success(
        "Service category updated successfully",
        category,
    )))
}

pub async fn delete_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .store
        .delete_category(category_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(HttpError::not_found(format!(
            "Service category {} not found",
            category_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_active_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .store
        .get_active_categories()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Active service categories retrieved successfully",
        categories,
    )))
}
