use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::{JobStatus, UrgencyLevel};

//Job DTOs
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateJobDto {
    pub customer_id: Uuid,

    pub category_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1.0, message = "Budget must be positive"))]
    pub budget: Option<f64>,

    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    pub urgency_level: Option<UrgencyLevel>,

    #[validate(range(min = 1, max = 50, message = "Required workers must be between 1 and 50"))]
    pub required_workers: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateJobDto {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1.0, message = "Budget must be positive"))]
    pub budget: Option<f64>,

    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub status: Option<JobStatus>,

    pub urgency_level: Option<UrgencyLevel>,

    #[validate(range(min = 1, max = 50, message = "Required workers must be between 1 and 50"))]
    pub required_workers: i32,
}

/// Job row joined with the customer and category names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<BigDecimal>,
    pub posted_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: JobStatus,
    pub urgency_level: Option<UrgencyLevel>,
    pub required_workers: i32,
    pub completed_workers: i32,
    pub customer_name: String,
    pub category_name: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActiveJobWithBids {
    pub id: Uuid,
    pub title: String,
    pub budget: Option<BigDecimal>,
    pub status: JobStatus,
    pub urgency_level: Option<UrgencyLevel>,
    pub posted_date: DateTime<Utc>,
    pub required_workers: i32,
    pub customer_name: String,
    pub category_name: String,
    pub total_bids: i64,
    pub accepted_bids: i64,
}

#[derive(Debug, Serialize)]
pub struct JobComplexity {
    pub job_id: Uuid,
    pub complexity_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn base_dto() -> CreateJobDto {
        CreateJobDto {
            customer_id: Uuid::nil(),
            category_id: Uuid::nil(),
            title: "Fix kitchen sink".to_string(),
            description: None,
            budget: Some(250.0),
            start_date: None,
            end_date: None,
            location: Some("Springfield".to_string()),
            latitude: None,
            longitude: None,
            urgency_level: Some(UrgencyLevel::Medium),
            required_workers: 1,
        }
    }

    #[test]
    fn valid_job_passes_validation() {
        assert!(base_dto().validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut dto = base_dto();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn zero_required_workers_is_rejected() {
        let mut dto = base_dto();
        dto.required_workers = 0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn negative_budget_is_rejected() {
        let mut dto = base_dto();
        dto.budget = Some(-5.0);
        assert!(dto.validate().is_err());
    }
}
