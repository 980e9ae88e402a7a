use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::BidStatus;

//Bid DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBidDto {
    pub job_id: Uuid,

    pub worker_id: Uuid,

    #[validate(range(min = 1.0, message = "Bid amount must be positive"))]
    pub bid_amount: Option<f64>,

    pub proposed_start_time: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Estimated duration must be positive"))]
    pub estimated_duration: Option<i32>,

    #[validate(length(max = 2500, message = "Cover letter must be at most 2500 characters"))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBidDto {
    pub id: Uuid,

    #[validate(range(min = 1.0, message = "Bid amount must be positive"))]
    pub bid_amount: Option<f64>,

    pub proposed_start_time: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Estimated duration must be positive"))]
    pub estimated_duration: Option<i32>,

    #[validate(length(max = 2500, message = "Cover letter must be at most 2500 characters"))]
    pub cover_letter: Option<String>,

    pub status: Option<BidStatus>,
}

/// Bid row joined with the worker and job display names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidListing {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub bid_amount: Option<BigDecimal>,
    pub proposed_start_time: Option<DateTime<Utc>>,
    pub estimated_duration: Option<i32>,
    pub bid_date: DateTime<Utc>,
    pub status: BidStatus,
    pub is_winning_bid: bool,
    pub worker_name: String,
    pub job_title: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidStats {
    pub job_id: Uuid,
    pub total_bids: i64,
    pub average_bid_amount: BigDecimal,
    pub min_bid_amount: BigDecimal,
    pub max_bid_amount: BigDecimal,
    pub accepted_bids: i64,
}

#[derive(Debug, Serialize)]
pub struct AcceptBidResponse {
    pub bid_id: Uuid,
    pub booking_code: String,
}
