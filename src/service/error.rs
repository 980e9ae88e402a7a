use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Bid {0} not found")]
    BidNotFound(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Worker {0} not found")]
    WorkerNotFound(Uuid),

    #[error("Customer {0} not found")]
    CustomerNotFound(Uuid),

    #[error("Service category {0} not found")]
    CategoryNotFound(Uuid),

    #[error("Notification {0} not found")]
    NotificationNotFound(Uuid),

    #[error("Job {0} is not open for bidding")]
    JobNotOpen(Uuid),

    #[error("Worker {1} already has a pending bid on job {0}")]
    DuplicateBid(Uuid, Uuid),

    #[error("Bid {0} cannot be accepted because its job is no longer open")]
    BidNotAcceptable(Uuid),

    #[error("Booking {0} is already completed")]
    BookingAlreadyCompleted(Uuid),

    #[error("Booking {0} is completed and retained for audit purposes")]
    CompletedBookingRetained(Uuid),

    #[error("Could not allocate a unique booking code")]
    BookingCodeExhausted,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::JobNotFound(_)
            | ServiceError::BidNotFound(_)
            | ServiceError::BookingNotFound(_)
            | ServiceError::WorkerNotFound(_)
            | ServiceError::CustomerNotFound(_)
            | ServiceError::CategoryNotFound(_)
            | ServiceError::NotificationNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::JobNotOpen(_)
            | ServiceError::DuplicateBid(_, _)
            | ServiceError::BidNotAcceptable(_)
            | ServiceError::BookingAlreadyCompleted(_)
            | ServiceError::CompletedBookingRetained(_) => HttpError::conflict(error.to_string()),

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            // Internal failure details are logged, never surfaced to clients.
            ServiceError::Database(ref err) => {
                tracing::error!("database error: {}", err);
                HttpError::server_error("Internal server error")
            }
            ServiceError::BookingCodeExhausted => {
                tracing::error!("booking code space exhausted after retries");
                HttpError::server_error("Internal server error")
            }
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::BidNotFound(_)
            | ServiceError::BookingNotFound(_)
            | ServiceError::WorkerNotFound(_)
            | ServiceError::CustomerNotFound(_)
            | ServiceError::CategoryNotFound(_)
            | ServiceError::NotificationNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::JobNotOpen(_)
            | ServiceError::DuplicateBid(_, _)
            | ServiceError::BidNotAcceptable(_)
            | ServiceError::BookingAlreadyCompleted(_)
            | ServiceError::CompletedBookingRetained(_) => StatusCode::CONFLICT,

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_) | ServiceError::BookingCodeExhausted => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ServiceError::BidNotFound(Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HttpError::from(err).status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn guard_violations_map_to_409() {
        assert_eq!(
            ServiceError::BookingAlreadyCompleted(Uuid::nil()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::CompletedBookingRetained(Uuid::nil()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::JobNotOpen(Uuid::nil()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_errors_are_sanitized() {
        let err = ServiceError::Database(sqlx::Error::RowNotFound);
        let http: HttpError = err.into();
        assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(http.message, "Internal server error");
    }
}
