// handler/reviews.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::reviewdb::{NewReview, ReviewExt},
    dtos::{common::ApiResponse, reviewdtos::CreateReviewDto},
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/booking/:booking_id", get(get_reviews_by_booking))
        .route("/worker/:worker_id", get(get_reviews_by_worker))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking_id = body.booking_id;

    let review = app_state
        .store
        .create_review(NewReview {
            booking_id: body.booking_id,
            reviewer_id: body.reviewer_id,
            reviewed_id: body.reviewed_id,
            rating: body.rating,
            comment: body.comment,
        })
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23503")
                    && db_err.constraint() == Some("reviews_booking_id_fkey")
                {
                    return HttpError::not_found(format!("Booking {} not found", booking_id));
                }
            }
            internal_error(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Review created successfully", review)),
    ))
}

pub async fn get_reviews_by_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .store
        .get_reviews_by_booking(booking_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Reviews retrieved successfully",
        reviews,
    )))
}

pub async fn get_reviews_by_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .store
        .get_reviews_by_worker(worker_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Reviews retrieved successfully",
        reviews,
    )))
}
