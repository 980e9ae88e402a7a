// handler/workers.rs
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
    db::workerdb::{NewWorker, NewWorkerSkill, WorkerChanges, WorkerExt},
    dtos::{
        common::ApiResponse,
        workerdtos::{AddWorkerSkillDto, CreateWorkerDto, UpdateWorkerDto},
    },
    error::HttpError,
    handler::{internal_error, registration_error},
    utils::password,
    AppState,
};

pub fn workers_handler() -> Router {
    Router::new()
        .route("/", get(list_workers).post(create_worker))
        .route("/top-rated", get(get_top_rated_workers))
        .route("/skill/:category_id", get(get_workers_by_skill))
        .route("/city/:city", get(get_workers_by_city))
        .route(
            "/available/:job_id/category/:category_id",
            get(get_available_workers),
        )
        .route(
            "/top-performers/category/:category_id",
            get(get_top_performers),
        )
        .route(
            "/:worker_id",
            get(get_worker).put(update_worker).delete(delete_worker),
        )
        .route("/:worker_id/performance", get(get_worker_performance))
        .route("/:worker_id/reliability", get(get_worker_reliability))
        .route(
            "/:worker_id/skills",
            get(get_worker_skills).post(add_worker_skill),
        )
}

pub async fn list_workers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let workers = app_state
        .store
        .list_workers()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Workers retrieved successfully",
        workers,
    )))
}

pub async fn create_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateWorkerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let password_hash = password::hash(&body.password).map_err(HttpError::server_error)?;

    let hourly_rate = body
        .hourly_rate
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid hourly rate"))?;

    let worker = app_state
        .store
        .create_worker(NewWorker {
            email: body.email,
            password_hash,
            phone_number: body.phone_number,
            first_name: body.first_name,
            last_name: body.last_name,
            date_of_birth: body.date_of_birth,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
            hourly_rate,
            bio: body.bio,
        })
        .await
        .map_err(registration_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Worker created successfully", worker)),
    ))
}

pub async fn get_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let worker = app_state
        .store
        .get_worker_by_id(worker_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Worker {} not found", worker_id)))?;

    Ok(Json(ApiResponse::success(
        "Worker retrieved successfully",
        worker,
    )))
}

pub async fn update_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
    Json(body): Json<UpdateWorkerDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != worker_id {
        return Err(HttpError::bad_request("Worker ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let hourly_rate = body
        .hourly_rate
        .map(sqlx::types::BigDecimal::try_from)
        .transpose()
        .map_err(|_| HttpError::bad_request("Invalid hourly rate"))?;

    let worker = app_state
        .store
        .update_worker(
            worker_id,
            WorkerChanges {
                phone_number: body.phone_number,
                first_name: body.first_name,
                last_name: body.last_name,
                date_of_birth: body.date_of_birth,
                address: body.address,
                city: body.city,
                postal_code: body.postal_code,
                hourly_rate,
                bio: body.bio,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Worker {} not found", worker_id)))?;

    Ok(Json(ApiResponse::success(
        "Worker updated successfully",
        worker,
    )))
}

pub async fn delete_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .store
        .delete_worker(worker_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(HttpError::not_found(format!("Worker {} not found", worker_id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_workers_by_skill(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let workers = app_state
        .store
        .get_workers_by_skill(category_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Workers retrieved successfully",
        workers,
    )))
}

pub async fn get_workers_by_city(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let workers = app_state
        .store
        .get_workers_by_city(&city)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Workers retrieved successfully",
        workers,
    )))
}

pub async fn get_available_workers(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((_job_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let workers = app_state.report_service.available_workers(category_id).await?;

    Ok(Json(ApiResponse::success(
        "Available workers retrieved successfully",
        workers,
    )))
}

pub async fn get_worker_performance(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let performance = app_state.report_service.worker_performance(worker_id).await?;

    Ok(Json(ApiResponse::success(
        "Worker performance retrieved successfully",
        performance,
    )))
}

pub async fn get_top_performers(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let performers = app_state.report_service.top_performers(category_id).await?;

    Ok(Json(ApiResponse::success(
        "Top performers retrieved successfully",
        performers,
    )))
}

pub async fn get_worker_reliability(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reliability = app_state.report_service.worker_reliability(worker_id).await?;

    Ok(Json(ApiResponse::success(
        "Worker reliability retrieved successfully",
        reliability,
    )))
}

pub async fn get_top_rated_workers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let workers = app_state.report_service.top_rated_workers().await?;

    Ok(Json(ApiResponse::success(
        "Top rated workers retrieved successfully",
        workers,
    )))
}

pub async fn add_worker_skill(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
    Json(body): Json<AddWorkerSkillDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let category_id = body.category_id;

    let skill = app_state
        .store
        .add_worker_skill(
            worker_id,
            NewWorkerSkill {
                category_id: body.category_id,
                skill_level: body.skill_level,
                certification_url: body.certification_url,
                certification_expiry: body.certification_expiry,
                years_experience: body.years_experience,
            },
        )
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23503") {
                    match db_err.constraint() {
                        Some("worker_skills_worker_id_fkey") => {
                            return HttpError::not_found(format!(
                                "Worker {} not found",
                                worker_id
                            ))
                        }
                        Some("worker_skills_category_id_fkey") => {
                            return HttpError::not_found(format!(
                                "Service category {} not found",
                                category_id
                            ))
                        }
                        _ => {}
                    }
                }
                if db_err.code().as_deref() == Some("23505") {
                    return HttpError::conflict("Worker already has a skill in this category");
                }
            }
            internal_error(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Worker skill added successfully", skill)),
    ))
}

pub async fn get_worker_skills(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let skills = app_state
        .store
        .get_worker_skills(worker_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Worker skills retrieved successfully",
        skills,
    )))
}
