// db/reviewdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::models::reviewmodel::Review;

pub struct NewReview {
    pub booking_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

#[async_trait]
pub trait ReviewExt {
    /// Inserts the review and refreshes the reviewed worker's aggregate
    /// rating in the same transaction.
    async fn create_review(&self, review: NewReview) -> Result<Review, Error>;

    async fn get_reviews_by_booking(&self, booking_id: Uuid) -> Result<Vec<Review>, Error>;

    async fn get_reviews_by_worker(&self, worker_id: Uuid) -> Result<Vec<Review>, Error>;
}

const REVIEW_COLUMNS: &str = r#"
    id, booking_id, reviewer_id, reviewed_id, rating, comment, review_date,
    is_disputed, dispute_resolution, was_helpful
"#;

#[async_trait]
impl ReviewExt for QueryClient {
    async fn create_review(&self, review: NewReview) -> Result<Review, Error> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (booking_id, reviewer_id, reviewed_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.booking_id)
        .bind(review.reviewer_id)
        .bind(review.reviewed_id)
        .bind(review.rating)
        .bind(review.comment)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE workers
            SET overall_rating = (
                SELECT AVG(r.rating)::NUMERIC(3,2) FROM reviews r WHERE r.reviewed_id = $1
            )
            WHERE id = $1
            "#,
        )
        .bind(review.reviewed_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_reviews_by_booking(&self, booking_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE booking_id = $1 ORDER BY review_date DESC"
        ))
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reviews_by_worker(&self, worker_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewed_id = $1 ORDER BY review_date DESC"
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl ReviewExt for ProcClient {
    async fn create_review(&self, review: NewReview) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>("SELECT * FROM sp_create_review($1, $2, $3, $4, $5)")
            .bind(review.booking_id)
            .bind(review.reviewer_id)
            .bind(review.reviewed_id)
            .bind(review.rating)
            .bind(review.comment)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_reviews_by_booking(&self, booking_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>("SELECT * FROM fn_reviews_by_booking($1)")
            .bind(booking_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_reviews_by_worker(&self, worker_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>("SELECT * FROM fn_reviews_by_worker($1)")
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }
}
