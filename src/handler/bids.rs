// handler/bids.rs
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
    db::biddb::{BidChanges, BidExt},
    dtos::{
        biddtos::{AcceptBidResponse, CreateBidDto, UpdateBidDto},
        common::ApiResponse,
    },
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn bids_handler() -> Router {
    Router::new()
        .route("/", get(list_bids).post(create_bid))
        .route("/job/:job_id", get(get_bids_by_job))
        .route("/job/:job_id/stats", get(get_bid_stats))
        .route("/worker/:worker_id", get(get_bids_by_worker))
        .route("/:bid_id", get(get_bid).put(update_bid).delete(delete_bid))
        .route("/:bid_id/accept", post(accept_bid))
}

pub async fn list_bids(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state.store.list_bids().await.map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Bids retrieved successfully", bids)))
}

pub async fn create_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bid = app_state.workflow_service.place_bid(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Bid placed successfully", bid)),
    ))
}

pub async fn get_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bid_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bid = app_state
        .store
        .get_bid_by_id(bid_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Bid {} not found", bid_id)))?;

    Ok(Json(ApiResponse::success("Bid retrieved successfully", bid)))
}

pub async fn update_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bid_id): Path<Uuid>,
    Json(body): Json<UpdateBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != bid_id {
        return Err(HttpError::bad_request("Bid ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bid_amount = body
        .bid_amount
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid bid amount"))?;

    let bid = app_state
        .store
        .update_bid(
            bid_id,
            BidChanges {
                bid_amount,
                proposed_start_time: body.proposed_start_time,
                estimated_duration: body.estimated_duration,
                cover_letter: body.cover_letter,
                status: body.status,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Bid {} not found", bid_id)))?;

    Ok(Json(ApiResponse::success("Bid updated successfully", bid)))
}

pub async fn delete_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bid_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .store
        .delete_bid(bid_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(HttpError::not_found(format!("Bid {} not found", bid_id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_bids_by_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state
        .store
        .get_bids_by_job(job_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Bids retrieved successfully", bids)))
}

pub async fn get_bids_by_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state
        .store
        .get_bids_by_worker(worker_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Bids retrieved successfully", bids)))
}

pub async fn get_bid_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state.report_service.bid_stats(job_id).await?;

    Ok(Json(ApiResponse::success(
        "Bid statistics retrieved successfully",
        stats,
    )))
}

pub async fn accept_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bid_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking_code = app_state.workflow_service.accept_bid(bid_id).await?;

    Ok(Json(ApiResponse::success(
        "Bid accepted successfully",
        AcceptBidResponse {
            bid_id,
            booking_code,
        },
    )))
}
