// db/bookingdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::db::{guard, ProcClient, QueryClient};
use crate::dtos::bookingdtos::{BookingListing, BookingSummaryByCategory};
use crate::models::jobmodel::{Booking, BookingStatus};
use crate::utils::booking_code::generate_booking_code;

pub struct NewBooking {
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub bid_id: Uuid,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
}

pub struct BookingChanges {
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
    pub cancellation_reason: Option<String>,
    pub completion_notes: Option<String>,
}

#[async_trait]
pub trait BookingExt {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, Error>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, Error>;

    async fn list_bookings(&self) -> Result<Vec<BookingListing>, Error>;

    async fn update_booking(
        &self,
        booking_id: Uuid,
        changes: BookingChanges,
    ) -> Result<Option<Booking>, Error>;

    /// Completed bookings are retained for audit; deleting one fails with
    /// `completed_booking_retained`. Returns false when the row is absent.
    async fn delete_booking(&self, booking_id: Uuid) -> Result<bool, Error>;

    async fn get_bookings_by_worker(&self, worker_id: Uuid) -> Result<Vec<BookingListing>, Error>;

    async fn get_bookings_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingListing>, Error>;

    /// Completes the booking and its job, then recounts the job's completed
    /// bookings into `completed_workers`, all in one transaction. Fails with
    /// `booking_already_completed` on a second completion.
    async fn complete_booking(
        &self,
        booking_id: Uuid,
        completion_notes: Option<String>,
    ) -> Result<Booking, Error>;

    async fn get_booking_summary_by_category(
        &self,
    ) -> Result<Vec<BookingSummaryByCategory>, Error>;
}

const BOOKING_COLUMNS: &str = r#"
    id, job_id, worker_id, bid_id, scheduled_start, scheduled_end, actual_start,
    actual_end, status, cancellation_reason, booking_code, completion_notes
"#;

const BOOKING_LISTING_SELECT: &str = r#"
    SELECT
        b.id, b.job_id, b.worker_id, b.bid_id, b.scheduled_start, b.scheduled_end,
        b.status, b.booking_code,
        j.title AS job_title,
        w.first_name || ' ' || w.last_name AS worker_name,
        c.first_name || ' ' || c.last_name AS customer_name
    FROM bookings b
    JOIN jobs j ON j.id = b.job_id
    JOIN workers w ON w.id = b.worker_id
    JOIN customers c ON c.id = j.customer_id
"#;

#[async_trait]
impl BookingExt for QueryClient {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, Error> {
        let mut attempts = 0;
        loop {
            let booking_code = generate_booking_code();

            let inserted = sqlx::query_as::<_, Booking>(&format!(
                r#"
                INSERT INTO bookings
                (job_id, worker_id, bid_id, scheduled_start, scheduled_end, booking_code)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (booking_code) DO NOTHING
                RETURNING {BOOKING_COLUMNS}
                "#
            ))
            .bind(booking.job_id)
            .bind(booking.worker_id)
            .bind(booking.bid_id)
            .bind(booking.scheduled_start)
            .bind(booking.scheduled_end)
            .bind(booking_code)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(created) = inserted {
                return Ok(created);
            }

            attempts += 1;
            if attempts >= 5 {
                return Err(Error::Protocol(guard::BOOKING_CODE_EXHAUSTED.into()));
            }
        }
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_bookings(&self) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>(&format!(
            r#"
            {BOOKING_LISTING_SELECT}
            ORDER BY b.scheduled_start DESC NULLS LAST, b.scheduled_end DESC NULLS LAST, b.id DESC
            LIMIT 100
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking(
        &self,
        booking_id: Uuid,
        changes: BookingChanges,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET scheduled_start = $2, scheduled_end = $3, actual_start = $4,
                actual_end = $5, status = COALESCE($6, status),
                cancellation_reason = $7, completion_notes = $8
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(changes.scheduled_start)
        .bind(changes.scheduled_end)
        .bind(changes.actual_start)
        .bind(changes.actual_end)
        .bind(changes.status)
        .bind(changes.cancellation_reason)
        .bind(changes.completion_notes)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_booking(&self, booking_id: Uuid) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        let status = sqlx::query_scalar::<_, BookingStatus>(
            "SELECT status FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(status) = status else {
            return Ok(false);
        };

        if status == BookingStatus::Completed {
            return Err(Error::Protocol(guard::COMPLETED_BOOKING_RETAINED.into()));
        }

        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }

    async fn get_bookings_by_worker(&self, worker_id: Uuid) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>(&format!(
            "{BOOKING_LISTING_SELECT} WHERE b.worker_id = $1 ORDER BY b.scheduled_start DESC NULLS LAST"
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bookings_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>(&format!(
            "{BOOKING_LISTING_SELECT} WHERE j.customer_id = $1 ORDER BY b.scheduled_start DESC NULLS LAST"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn complete_booking(
        &self,
        booking_id: Uuid,
        completion_notes: Option<String>,
    ) -> Result<Booking, Error> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE"
        ))
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;

        if current.status == BookingStatus::Completed {
            return Err(Error::Protocol(guard::BOOKING_ALREADY_COMPLETED.into()));
        }

        sqlx::query("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(current.job_id)
            .execute(&mut *tx)
            .await?;

        let completed = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = 'completed'::booking_status, actual_end = NOW(), completion_notes = $2
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(completion_notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'completed'::job_status,
                completed_workers = (
                    SELECT COUNT(*) FROM bookings
                    WHERE job_id = $1 AND status = 'completed'::booking_status
                )
            WHERE id = $1
            "#,
        )
        .bind(current.job_id)
        .execute(&mut *tx)
        .await?;

        let customer_id = sqlx::query_scalar::<_, Uuid>("SELECT customer_id FROM jobs WHERE id = $1")
            .bind(current.job_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO notifications
            (user_id, notification_type, title, message, related_entity_id, related_entity_type)
            VALUES ($1, 'booking_completed', 'Your booking has been completed', $2, $3, 'booking')
            "#,
        )
        .bind(customer_id)
        .bind(format!("Booking {} has been marked completed", completed.booking_code))
        .bind(completed.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(completed)
    }

    async fn get_booking_summary_by_category(
        &self,
    ) -> Result<Vec<BookingSummaryByCategory>, Error> {
        sqlx::query_as::<_, BookingSummaryByCategory>(
            r#"
            SELECT
                sc.category_name,
                COUNT(*) FILTER (WHERE b.status = 'scheduled'::booking_status) AS scheduled_count,
                COUNT(*) FILTER (WHERE b.status = 'in_progress'::booking_status) AS in_progress_count,
                COUNT(*) FILTER (WHERE b.status = 'completed'::booking_status) AS completed_count,
                COUNT(*) FILTER (WHERE b.status = 'cancelled'::booking_status) AS cancelled_count,
                COUNT(*) AS total_bookings,
                COALESCE((
                    SELECT AVG(r.rating)::float8 FROM reviews r
                    WHERE r.booking_id IN (
                        SELECT b2.id FROM bookings b2
                        JOIN jobs j2 ON j2.id = b2.job_id
                        WHERE j2.category_id = sc.id
                    )
                ), 0) AS average_completion_rating
            FROM bookings b
            JOIN jobs j ON j.id = b.job_id
            JOIN service_categories sc ON sc.id = j.category_id
            GROUP BY sc.id, sc.category_name
            ORDER BY sc.category_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl BookingExt for ProcClient {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM sp_create_booking($1, $2, $3, $4, $5)")
            .bind(booking.job_id)
            .bind(booking.worker_id)
            .bind(booking.bid_id)
            .bind(booking.scheduled_start)
            .bind(booking.scheduled_end)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM fn_get_booking($1)")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_bookings(&self) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>("SELECT * FROM fn_list_bookings()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_booking(
        &self,
        booking_id: Uuid,
        changes: BookingChanges,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM sp_update_booking($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(booking_id)
        .bind(changes.scheduled_start)
        .bind(changes.scheduled_end)
        .bind(changes.actual_start)
        .bind(changes.actual_end)
        .bind(changes.status)
        .bind(changes.cancellation_reason)
        .bind(changes.completion_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn delete_booking(&self, booking_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_booking($1)")
            .bind(booking_id)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_bookings_by_worker(&self, worker_id: Uuid) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>("SELECT * FROM fn_bookings_by_worker($1)")
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_bookings_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>("SELECT * FROM fn_bookings_by_customer($1)")
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn complete_booking(
        &self,
        booking_id: Uuid,
        completion_notes: Option<String>,
    ) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM sp_complete_booking($1, $2)")
            .bind(booking_id)
            .bind(completion_notes)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_booking_summary_by_category(
        &self,
    ) -> Result<Vec<BookingSummaryByCategory>, Error> {
        sqlx::query_as::<_, BookingSummaryByCategory>(
            "SELECT * FROM vw_booking_summary_by_category",
        )
        .fetch_all(&self.pool)
        .await
    }
}
