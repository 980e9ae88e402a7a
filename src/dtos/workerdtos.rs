use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::models::workermodel::SkillLevel;

//Worker DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateWorkerDto {
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

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 50, message = "City must be at most 50 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "Postal code must be at most 10 characters"))]
    pub postal_code: Option<String>,

    #[validate(range(min = 0.0, message = "Hourly rate must be positive"))]
    pub hourly_rate: Option<f64>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateWorkerDto {
    pub id: Uuid,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 50, message = "City must be at most 50 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "Postal code must be at most 10 characters"))]
    pub postal_code: Option<String>,

    #[validate(range(min = 0.0, message = "Hourly rate must be positive"))]
    pub hourly_rate: Option<f64>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddWorkerSkillDto {
    pub category_id: Uuid,

    pub skill_level: Option<SkillLevel>,

    #[validate(url(message = "Invalid certification URL"))]
    pub certification_url: Option<String>,

    pub certification_expiry: Option<NaiveDate>,

    #[validate(range(min = 0, max = 60, message = "Years of experience must be between 0 and 60"))]
    pub years_experience: Option<i32>,
}

/// Worker profile joined with its user row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkerDetail {
    pub id: Uuid,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub hourly_rate: Option<BigDecimal>,
    pub overall_rating: Option<BigDecimal>,
    pub total_jobs_completed: i32,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AvailableWorker {
    pub id: Uuid,
    pub full_name: String,
    pub hourly_rate: Option<BigDecimal>,
    pub overall_rating: Option<BigDecimal>,
    pub total_jobs_completed: i32,
    pub skill_level: Option<SkillLevel>,
    pub years_experience: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkerPerformance {
    pub id: Uuid,
    pub full_name: String,
    pub hourly_rate: Option<BigDecimal>,
    pub overall_rating: Option<BigDecimal>,
    pub total_jobs_completed: i32,
    pub total_bids_placed: i64,
    pub winning_bids: i64,
    pub average_rating: f64,
    pub total_reviews: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopPerformer {
    pub id: Uuid,
    pub full_name: String,
    pub hourly_rate: Option<BigDecimal>,
    pub overall_rating: Option<BigDecimal>,
    pub total_jobs_completed: i32,
    pub total_bids: i64,
    pub winning_bids: i64,
    pub win_rate_percentage: f64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopRatedWorker {
    pub id: Uuid,
    pub full_name: String,
    pub hourly_rate: Option<BigDecimal>,
    pub overall_rating: Option<BigDecimal>,
    pub total_jobs_completed: i32,
    pub city: Option<String>,
    pub category_name: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WorkerReliability {
    pub worker_id: Uuid,
    pub reliability_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn base_dto() -> CreateWorkerDto {
        CreateWorkerDto {
            email: "worker@example.com".to_string(),
            password: "correct horse battery".to_string(),
            phone_number: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: None,
            address: None,
            city: Some("Springfield".to_string()),
            postal_code: None,
            hourly_rate: Some(45.0),
            bio: None,
        }
    }

    #[test]
    fn valid_worker_passes_validation() {
        assert!(base_dto().validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut dto = base_dto();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut dto = base_dto();
        dto.password = "short".to_string();
        assert!(dto.validate().is_err());
    }
}
