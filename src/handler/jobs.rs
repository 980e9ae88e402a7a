// handler/jobs.rs
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
    db::jobdb::{JobChanges, JobExt},
    dtos::{
        common::ApiResponse,
        jobdtos::{CreateJobDto, UpdateJobDto},
    },
    error::HttpError,
    handler::internal_error,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/open", get(get_open_jobs))
        .route("/active-with-bids", get(get_active_jobs_with_bids))
        .route("/category/:category_id", get(get_jobs_by_category))
        .route("/customer/:customer_id", get(get_jobs_by_customer))
        .route("/location/:city/category/:category_id", get(get_jobs_by_location))
        .route("/:job_id", get(get_job).put(update_job).delete(delete_job))
        .route("/:job_id/complexity", get(get_job_complexity))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.store.list_jobs().await.map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state.workflow_service.post_job(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Job created successfully", job)),
    ))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .store
        .get_job_by_id(job_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Job {} not found", job_id)))?;

    Ok(Json(ApiResponse::success("Job retrieved successfully", job)))
}

pub async fn update_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<UpdateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != job_id {
        return Err(HttpError::bad_request("Job ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let budget = body
        .budget
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid budget"))?;

    let job = app_state
        .store
        .update_job(
            job_id,
            JobChanges {
                title: body.title,
                description: body.description,
                budget,
                start_date: body.start_date,
                end_date: body.end_date,
                location: body.location,
                status: body.status,
                urgency_level: body.urgency_level,
                required_workers: body.required_workers,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Job {} not found", job_id)))?;

    Ok(Json(ApiResponse::success("Job updated successfully", job)))
}

pub async fn delete_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .store
        .delete_job(job_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(HttpError::not_found(format!("Job {} not found", job_id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_open_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .store
        .get_open_jobs()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Open jobs retrieved successfully", jobs)))
}

pub async fn get_jobs_by_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .store
        .get_jobs_by_category(category_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn get_jobs_by_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .store
        .get_jobs_by_customer(customer_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn get_jobs_by_location(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((city, category_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .store
        .get_jobs_by_location(&city, category_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn get_active_jobs_with_bids(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.report_service.active_jobs_with_bids().await?;

    Ok(Json(ApiResponse::success(
        "Active jobs retrieved successfully",
        jobs,
    )))
}

pub async fn get_job_complexity(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let complexity = app_state.report_service.job_complexity(job_id).await?;

    Ok(Json(ApiResponse::success(
        "Job complexity calculated successfully",
        complexity,
    )))
}
