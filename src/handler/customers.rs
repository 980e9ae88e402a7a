// handler/customers.rs
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
    db::customerdb::{CustomerChanges, CustomerExt, NewCustomer},
    dtos::{
        common::ApiResponse,
        customerdtos::{CreateCustomerDto, UpdateCustomerDto},
    },
    error::HttpError,
    handler::{internal_error, registration_error},
    utils::password,
    AppState,
};

pub fn customers_handler() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/analytics", get(get_customer_analytics))
        .route("/city/:city", get(get_customers_by_city))
        .route(
            "/:customer_id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn list_customers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let customers = app_state
        .store
        .list_customers()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Customers retrieved successfully",
        customers,
    )))
}

pub async fn create_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCustomerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let password_hash = password::hash(&body.password).map_err(HttpError::server_error)?;

    let customer = app_state
        .store
        .create_customer(NewCustomer {
            email: body.email,
            password_hash,
            phone_number: body.phone_number,
            first_name: body.first_name,
            last_name: body.last_name,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
        })
        .await
        .map_err(registration_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Customer created successfully",
            customer,
        )),
    ))
}

pub async fn get_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let customer = app_state
        .store
        .get_customer_by_id(customer_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Customer {} not found", customer_id)))?;

    Ok(Json(ApiResponse::success(
        "Customer retrieved successfully",
        customer,
    )))
}

pub async fn update_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
    Json(body): Json<UpdateCustomerDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.id != customer_id {
        return Err(HttpError::bad_request("Customer ID mismatch"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let customer = app_state
        .store
        .update_customer(
            customer_id,
            CustomerChanges {
                phone_number: body.phone_number,
                first_name: body.first_name,
                last_name: body.last_name,
                address: body.address,
                city: body.city,
                postal_code: body.postal_code,
            },
        )
        .await
        .map_err(internal_error)?
        .ok_or_else(|| HttpError::not_found(format!("Customer {} not found", customer_id)))?;

    Ok(Json(ApiResponse::success(
        "Customer updated successfully",
        customer,
    )))
}

pub async fn delete_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .store
        .delete_customer(customer_id)
        .await
        .map_err(internal_error)?;

    if !deleted {
        return Err(HttpError::not_found(format!(
            "Customer {} not found",
            customer_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_customers_by_city(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let customers = app_state
        .store
        .get_customers_by_city(&city)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(
        "Customers retrieved successfully",
        customers,
    )))
}

pub async fn get_customer_analytics(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let analytics = app_state.report_service.customer_analytics().await?;

    Ok(Json(ApiResponse::success(
        "Customer analytics retrieved successfully",
        analytics,
    )))
}
