// service/workflow_service.rs
use std::sync::Arc;

use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{
        biddb::{BidExt, NewBid},
        bookingdb::{BookingExt, NewBooking},
        db::{guard, DataStore},
        jobdb::{JobExt, NewJob},
    },
    dtos::{biddtos::CreateBidDto, bookingdtos::CreateBookingDto, jobdtos::CreateJobDto},
    models::jobmodel::{Bid, Booking, Job},
    service::error::ServiceError,
};

/// Drives the job lifecycle: posting, bidding, acceptance, completion.
/// Every mutation is one atomic store operation; this layer turns the store's
/// guard signals into typed errors.
#[derive(Debug, Clone)]
pub struct WorkflowService {
    store: Arc<dyn DataStore>,
}

impl WorkflowService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn post_job(&self, job_data: CreateJobDto) -> Result<Job, ServiceError> {
        let customer_id = job_data.customer_id;
        let category_id = job_data.category_id;

        let job = self
            .store
            .create_job(NewJob {
                customer_id,
                category_id,
                title: job_data.title,
                description: job_data.description,
                budget: to_decimal(job_data.budget)?,
                start_date: job_data.start_date,
                end_date: job_data.end_date,
                location: job_data.location,
                latitude: to_decimal(job_data.latitude)?,
                longitude: to_decimal(job_data.longitude)?,
                urgency_level: job_data.urgency_level,
                required_workers: job_data.required_workers,
            })
            .await
            .map_err(|e| {
                match foreign_key(&e) {
                    Some("jobs_customer_id_fkey") => {
                        return ServiceError::CustomerNotFound(customer_id)
                    }
                    Some("jobs_category_id_fkey") => {
                        return ServiceError::CategoryNotFound(category_id)
                    }
                    _ => {}
                }
                e.into()
            })?;

        tracing::info!("job {} posted by customer {}", job.id, job.customer_id);

        Ok(job)
    }

    pub async fn place_bid(&self, bid_data: CreateBidDto) -> Result<Bid, ServiceError> {
        let job_id = bid_data.job_id;
        let worker_id = bid_data.worker_id;

        let bid = self
            .store
            .create_bid(NewBid {
                job_id,
                worker_id,
                bid_amount: to_decimal(bid_data.bid_amount)?,
                proposed_start_time: bid_data.proposed_start_time,
                estimated_duration: bid_data.estimated_duration,
                cover_letter: bid_data.cover_letter,
            })
            .await
            .map_err(|e| {
                match &e {
                    sqlx::Error::RowNotFound => return ServiceError::JobNotFound(job_id),
                    sqlx::Error::Protocol(tag) if tag == guard::JOB_NOT_OPEN => {
                        return ServiceError::JobNotOpen(job_id)
                    }
                    sqlx::Error::Protocol(tag) if tag == guard::DUPLICATE_PENDING_BID => {
                        return ServiceError::DuplicateBid(job_id, worker_id)
                    }
                    _ => {}
                }
                if foreign_key(&e) == Some("bids_worker_id_fkey") {
                    return ServiceError::WorkerNotFound(worker_id);
                }
                e.into()
            })?;

        tracing::info!("worker {} placed bid {} on job {}", worker_id, bid.id, job_id);

        Ok(bid)
    }

    /// Returns the booking code generated for the winning bid.
    pub async fn accept_bid(&self, bid_id: Uuid) -> Result<String, ServiceError> {
        let booking_code = self
            .store
            .accept_bid(bid_id)
            .await
            .map_err(|e| match &e {
                sqlx::Error::RowNotFound => ServiceError::BidNotFound(bid_id),
                sqlx::Error::Protocol(tag) if tag == guard::JOB_NOT_OPEN => {
                    ServiceError::BidNotAcceptable(bid_id)
                }
                sqlx::Error::Protocol(tag) if tag == guard::BOOKING_CODE_EXHAUSTED => {
                    ServiceError::BookingCodeExhausted
                }
                _ => e.into(),
            })?;

        tracing::info!("bid {} accepted, booking {} created", bid_id, booking_code);

        Ok(booking_code)
    }

    pub async fn create_booking(
        &self,
        booking_data: CreateBookingDto,
    ) -> Result<Booking, ServiceError> {
        let job_id = booking_data.job_id;
        let worker_id = booking_data.worker_id;
        let bid_id = booking_data.bid_id;

        let booking = self
            .store
            .create_booking(NewBooking {
                job_id,
                worker_id,
                bid_id,
                scheduled_start: booking_data.scheduled_start,
                scheduled_end: booking_data.scheduled_end,
            })
            .await
            .map_err(|e| {
                if let sqlx::Error::Protocol(tag) = &e {
                    if tag == guard::BOOKING_CODE_EXHAUSTED {
                        return ServiceError::BookingCodeExhausted;
                    }
                }
                match foreign_key(&e) {
                    Some("bookings_job_id_fkey") => return ServiceError::JobNotFound(job_id),
                    Some("bookings_worker_id_fkey") => {
                        return ServiceError::WorkerNotFound(worker_id)
                    }
                    Some("bookings_bid_id_fkey") => return ServiceError::BidNotFound(bid_id),
                    _ => {}
                }
                e.into()
            })?;

        Ok(booking)
    }

    pub async fn complete_booking(
        &self,
        booking_id: Uuid,
        completion_notes: Option<String>,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .store
            .complete_booking(booking_id, completion_notes)
            .await
            .map_err(|e| match &e {
                sqlx::Error::RowNotFound => ServiceError::BookingNotFound(booking_id),
                sqlx::Error::Protocol(tag) if tag == guard::BOOKING_ALREADY_COMPLETED => {
                    ServiceError::BookingAlreadyCompleted(booking_id)
                }
                _ => e.into(),
            })?;

        tracing::info!("booking {} completed for job {}", booking_id, booking.job_id);

        Ok(booking)
    }

    pub async fn delete_booking(&self, booking_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self
            .store
            .delete_booking(booking_id)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Protocol(tag) if tag == guard::COMPLETED_BOOKING_RETAINED => {
                    ServiceError::CompletedBookingRetained(booking_id)
                }
                _ => e.into(),
            })?;

        if !deleted {
            return Err(ServiceError::BookingNotFound(booking_id));
        }

        Ok(())
    }
}

fn to_decimal(value: Option<f64>) -> Result<Option<BigDecimal>, ServiceError> {
    value
        .map(|v| {
            BigDecimal::try_from(v)
                .map_err(|_| ServiceError::Validation(format!("Invalid numeric value: {}", v)))
        })
        .transpose()
}

fn foreign_key(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            db_err.constraint()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_decimal_passes_none_through() {
        assert!(to_decimal(None).unwrap().is_none());
        assert_eq!(
            to_decimal(Some(1500.0)).unwrap(),
            Some(BigDecimal::from(1500))
        );
    }

    #[test]
    fn to_decimal_rejects_non_finite_values() {
        assert!(to_decimal(Some(f64::NAN)).is_err());
        assert!(to_decimal(Some(f64::INFINITY)).is_err());
    }
}
