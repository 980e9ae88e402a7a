// db/biddb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::{guard, ProcClient, QueryClient};
use crate::dtos::biddtos::{BidListing, BidStats};
use crate::models::jobmodel::{Bid, BidStatus, Job, JobStatus};
use crate::utils::booking_code::generate_booking_code;

pub struct NewBid {
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub bid_amount: Option<BigDecimal>,
    pub proposed_start_time: Option<DateTime<Utc>>,
    pub estimated_duration: Option<i32>,
    pub cover_letter: Option<String>,
}

pub struct BidChanges {
    pub bid_amount: Option<BigDecimal>,
    pub proposed_start_time: Option<DateTime<Utc>>,
    pub estimated_duration: Option<i32>,
    pub cover_letter: Option<String>,
    pub status: Option<BidStatus>,
}

#[async_trait]
pub trait BidExt {
    /// Insert a Pending bid. Fails with `job_not_open` when the job has left
    /// the Open state and `duplicate_pending_bid` when the worker already has
    /// a Pending bid on the job.
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, Error>;

    async fn get_bid_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>, Error>;

    async fn list_bids(&self) -> Result<Vec<BidListing>, Error>;

    async fn update_bid(&self, bid_id: Uuid, changes: BidChanges) -> Result<Option<Bid>, Error>;

    async fn delete_bid(&self, bid_id: Uuid) -> Result<bool, Error>;

    async fn get_bids_by_job(&self, job_id: Uuid) -> Result<Vec<BidListing>, Error>;

    async fn get_bids_by_worker(&self, worker_id: Uuid) -> Result<Vec<BidListing>, Error>;

    async fn get_bid_stats(&self, job_id: Uuid) -> Result<BidStats, Error>;

    /// The central transition: accept one bid, reject the other Pending bids,
    /// create the booking and the worker notification, move the job to
    /// Assigned. All of it commits as one unit; the winning job row is locked
    /// so two racing accepts cannot both observe an Open job.
    async fn accept_bid(&self, bid_id: Uuid) -> Result<String, Error>;
}

const BID_COLUMNS: &str = r#"
    id, job_id, worker_id, bid_amount, proposed_start_time, estimated_duration,
    cover_letter, bid_date, status, is_winning_bid
"#;

const BID_LISTING_SELECT: &str = r#"
    SELECT
        b.id, b.job_id, b.worker_id, b.bid_amount, b.proposed_start_time,
        b.estimated_duration, b.bid_date, b.status, b.is_winning_bid,
        w.first_name || ' ' || w.last_name AS worker_name,
        j.title AS job_title
    FROM bids b
    JOIN workers w ON w.id = b.worker_id
    JOIN jobs j ON j.id = b.job_id
"#;

#[async_trait]
impl BidExt for QueryClient {
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, Error> {
        let mut tx = self.pool.begin().await?;

        let job_status = sqlx::query_scalar::<_, JobStatus>(
            "SELECT status FROM jobs WHERE id = $1 FOR UPDATE",
        )
        .bind(bid.job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;

        if job_status != JobStatus::Open {
            return Err(Error::Protocol(guard::JOB_NOT_OPEN.into()));
        }

        let duplicate = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM bids
            WHERE job_id = $1 AND worker_id = $2 AND status = 'pending'::bid_status
            "#,
        )
        .bind(bid.job_id)
        .bind(bid.worker_id)
        .fetch_optional(&mut *tx)
        .await?;

        if duplicate.is_some() {
            return Err(Error::Protocol(guard::DUPLICATE_PENDING_BID.into()));
        }

        let created = sqlx::query_as::<_, Bid>(&format!(
            r#"
            INSERT INTO bids
            (job_id, worker_id, bid_amount, proposed_start_time, estimated_duration, cover_letter)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {BID_COLUMNS}
            "#
        ))
        .bind(bid.job_id)
        .bind(bid.worker_id)
        .bind(bid.bid_amount)
        .bind(bid.proposed_start_time)
        .bind(bid.estimated_duration)
        .bind(bid.cover_letter)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_bid_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>(&format!("SELECT {BID_COLUMNS} FROM bids WHERE id = $1"))
            .bind(bid_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_bids(&self) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>(&format!(
            "{BID_LISTING_SELECT} ORDER BY b.bid_date DESC LIMIT 100"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_bid(&self, bid_id: Uuid, changes: BidChanges) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>(&format!(
            r#"
            UPDATE bids
            SET bid_amount = $2, proposed_start_time = $3, estimated_duration = $4,
                cover_letter = $5, status = COALESCE($6, status)
            WHERE id = $1
            RETURNING {BID_COLUMNS}
            "#
        ))
        .bind(bid_id)
        .bind(changes.bid_amount)
        .bind(changes.proposed_start_time)
        .bind(changes.estimated_duration)
        .bind(changes.cover_letter)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_bid(&self, bid_id: Uuid) -> Result<bool, Error> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM bids WHERE id = $1 RETURNING id")
            .bind(bid_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted.is_some())
    }

    async fn get_bids_by_job(&self, job_id: Uuid) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>(&format!(
            "{BID_LISTING_SELECT} WHERE b.job_id = $1 ORDER BY b.bid_date DESC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bids_by_worker(&self, worker_id: Uuid) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>(&format!(
            "{BID_LISTING_SELECT} WHERE b.worker_id = $1 ORDER BY b.bid_date DESC"
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bid_stats(&self, job_id: Uuid) -> Result<BidStats, Error> {
        sqlx::query_as::<_, BidStats>(
            r#"
            SELECT
                $1 AS job_id,
                COUNT(*) AS total_bids,
                COALESCE(AVG(bid_amount), 0) AS average_bid_amount,
                COALESCE(MIN(bid_amount), 0) AS min_bid_amount,
                COALESCE(MAX(bid_amount), 0) AS max_bid_amount,
                COUNT(*) FILTER (WHERE status = 'accepted'::bid_status) AS accepted_bids
            FROM bids
            WHERE job_id = $1
            "#,
        )
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn accept_bid(&self, bid_id: Uuid) -> Result<String, Error> {
        let mut tx = self.pool.begin().await?;

        let bid = sqlx::query_as::<_, Bid>(&format!(
            "SELECT {BID_COLUMNS} FROM bids WHERE id = $1 FOR UPDATE"
        ))
        .bind(bid_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, customer_id, category_id, title, description, budget, posted_date,
                   start_date, end_date, location, latitude, longitude, status,
                   urgency_level, required_workers, completed_workers
            FROM jobs WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(bid.job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;

        if job.status != JobStatus::Open {
            return Err(Error::Protocol(guard::JOB_NOT_OPEN.into()));
        }

        sqlx::query(
            r#"
            UPDATE bids
            SET status = 'accepted'::bid_status, is_winning_bid = true
            WHERE id = $1
            "#,
        )
        .bind(bid_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE bids
            SET status = 'rejected'::bid_status
            WHERE job_id = $1 AND id <> $2 AND status = 'pending'::bid_status
            "#,
        )
        .bind(bid.job_id)
        .bind(bid_id)
        .execute(&mut *tx)
        .await?;

        // Unique constraint on booking_code; regenerate on collision.
        let mut booking_code = generate_booking_code();
        let mut attempts = 0;
        loop {
            let inserted = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO bookings (job_id, worker_id, bid_id, scheduled_start, booking_code)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (booking_code) DO NOTHING
                RETURNING id
                "#,
            )
            .bind(bid.job_id)
            .bind(bid.worker_id)
            .bind(bid_id)
            .bind(bid.proposed_start_time)
            .bind(&booking_code)
            .fetch_optional(&mut *tx)
            .await?;

            if inserted.is_some() {
                break;
            }

            attempts += 1;
            if attempts >= 5 {
                return Err(Error::Protocol(guard::BOOKING_CODE_EXHAUSTED.into()));
            }
            booking_code = generate_booking_code();
        }

        sqlx::query("UPDATE jobs SET status = 'assigned'::job_status WHERE id = $1")
            .bind(bid.job_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO notifications
            (user_id, notification_type, title, message, related_entity_id, related_entity_type)
            VALUES ($1, 'bid_accepted', 'Your bid has been accepted!', $2, $3, 'job')
            "#,
        )
        .bind(bid.worker_id)
        .bind(format!(
            "Congratulations! Your bid has been accepted for job: {}",
            job.title
        ))
        .bind(job.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking_code)
    }
}

#[async_trait]
impl BidExt for ProcClient {
    async fn create_bid(&self, bid: NewBid) -> Result<Bid, Error> {
        sqlx::query_as::<_, Bid>("SELECT * FROM sp_create_bid($1, $2, $3, $4, $5, $6)")
            .bind(bid.job_id)
            .bind(bid.worker_id)
            .bind(bid.bid_amount)
            .bind(bid.proposed_start_time)
            .bind(bid.estimated_duration)
            .bind(bid.cover_letter)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_bid_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>("SELECT * FROM fn_get_bid($1)")
            .bind(bid_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_bids(&self) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>("SELECT * FROM fn_list_bids()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_bid(&self, bid_id: Uuid, changes: BidChanges) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>("SELECT * FROM sp_update_bid($1, $2, $3, $4, $5, $6)")
            .bind(bid_id)
            .bind(changes.bid_amount)
            .bind(changes.proposed_start_time)
            .bind(changes.estimated_duration)
            .bind(changes.cover_letter)
            .bind(changes.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn delete_bid(&self, bid_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_bid($1)")
            .bind(bid_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_bids_by_job(&self, job_id: Uuid) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>("SELECT * FROM fn_bids_by_job($1)")
            .bind(job_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_bids_by_worker(&self, worker_id: Uuid) -> Result<Vec<BidListing>, Error> {
        sqlx::query_as::<_, BidListing>("SELECT * FROM fn_bids_by_worker($1)")
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_bid_stats(&self, job_id: Uuid) -> Result<BidStats, Error> {
        sqlx::query_as::<_, BidStats>("SELECT * FROM fn_get_bid_stats($1)")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn accept_bid(&self, bid_id: Uuid) -> Result<String, Error> {
        sqlx::query_scalar::<_, String>("SELECT sp_accept_bid($1)")
            .bind(bid_id)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }
}
