use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

//Customer DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCustomerDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 50, message = "City must be at most 50 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "Postal code must be at most 10 characters"))]
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCustomerDto {
    pub id: Uuid,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 50, message = "City must be at most 50 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "Postal code must be at most 10 characters"))]
    pub postal_code: Option<String>,
}

/// Customer profile joined with its user row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerDetail {
    pub id: Uuid,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub customer_rating: Option<BigDecimal>,
    pub total_jobs_posted: i32,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerAnalytics {
    pub id: Uuid,
    pub customer_name: String,
    pub city: Option<String>,
    pub customer_rating: Option<BigDecimal>,
    pub total_jobs_posted: i32,
    pub active_jobs: i64,
    pub completed_jobs: i64,
    pub total_spend: BigDecimal,
}
