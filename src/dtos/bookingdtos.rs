use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::BookingStatus;

//Booking DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    pub job_id: Uuid,

    pub worker_id: Uuid,

    pub bid_id: Uuid,

    pub scheduled_start: Option<DateTime<Utc>>,

    pub scheduled_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBookingDto {
    pub id: Uuid,

    pub scheduled_start: Option<DateTime<Utc>>,

    pub scheduled_end: Option<DateTime<Utc>>,

    pub actual_start: Option<DateTime<Utc>>,

    pub actual_end: Option<DateTime<Utc>>,

    pub status: Option<BookingStatus>,

    #[validate(length(max = 255, message = "Cancellation reason must be at most 255 characters"))]
    pub cancellation_reason: Option<String>,

    #[validate(length(max = 2000, message = "Completion notes must be at most 2000 characters"))]
    pub completion_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CompleteBookingDto {
    #[validate(length(max = 2000, message = "Completion notes must be at most 2000 characters"))]
    pub completion_notes: Option<String>,
}

/// Booking row joined with job title, worker and customer names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingListing {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub bid_id: Uuid,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub status: BookingStatus,
    pub booking_code: String,
    pub job_title: String,
    pub worker_name: String,
    pub customer_name: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingSummaryByCategory {
    pub category_name: String,
    pub scheduled_count: i64,
    pub in_progress_count: i64,
    pub completed_count: i64,
    pub cancelled_count: i64,
    pub total_bookings: i64,
    pub average_completion_rating: f64,
}
