// handler/bookings.rs
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
    db::bookingdb::{BookingChanges, BookingExt},
    dtos::{
        bookingdtos::{CompleteBookingDto, CreateBookingDto, UpdateBookingDto},
        common::ApiResponse,
    },
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/summary-by-category", get(get_booking_summary_by_category))
        .route("/worker/:worker_id", get(get_bookings_by_worker))
        .route("/customer/:customer_id", get(get_bookings_by_customer))
        .route(
            "/:booking_id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/:booking_id/complete", post(complete_booking))
}

pub async fn list_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .store
        .list_bookings()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        bookings,
    )))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state.workflow_service.create_booking(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Booking created successfully", booking)),
    ))
}

pub async fn get_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .store
        .get_booking_by_id(booking_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Booking {} not found", booking_id)))?;

    Ok(Json(ApiResponse::success(
        "Booking retrieved successfully",
        booking,
    )))
}

pub async fn update_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != booking_id {
        return Err(HttpError::bad_request("Booking ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .store
        .update_booking(
            booking_id,
            BookingChanges {
                scheduled_start: body.scheduled_start,
                scheduled_end: body.scheduled_end,
                actual_start: body.actual_start,
                actual_end: body.actual_end,
                status: body.status,
                cancellation_reason: body.cancellation_reason,
                completion_notes: body.completion_notes,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Booking {} not found", booking_id)))?;

    Ok(Json(ApiResponse::success(
        "Booking updated successfully",
        booking,
    )))
}

pub async fn delete_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.workflow_service.delete_booking(booking_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_bookings_by_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .store
        .get_bookings_by_worker(worker_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        bookings,
    )))
}

pub async fn get_bookings_by_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .store
        .get_bookings_by_customer(customer_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        bookings,
    )))
}

pub async fn complete_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<CompleteBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .workflow_service
        .complete_booking(booking_id, body.completion_notes)
        .await?;

    Ok(Json(ApiResponse::success(
        "Booking completed successfully",
        booking,
    )))
}

pub async fn get_booking_summary_by_category(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = app_state.report_service.booking_summary_by_category().await?;

    Ok(Json(ApiResponse::success(
        "Booking summary retrieved successfully",
        summary,
    )))
}
