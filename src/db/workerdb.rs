// db/workerdb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::dtos::workerdtos::{
    AvailableWorker, TopPerformer, TopRatedWorker, WorkerDetail, WorkerPerformance,
};
use crate::models::workermodel::{SkillLevel, WorkerSkill};

pub struct NewWorker {
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub hourly_rate: Option<BigDecimal>,
    pub bio: Option<String>,
}

pub struct NewWorkerSkill {
    pub category_id: Uuid,
    pub skill_level: Option<SkillLevel>,
    pub certification_url: Option<String>,
    pub certification_expiry: Option<NaiveDate>,
    pub years_experience: Option<i32>,
}

pub struct WorkerChanges {
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub hourly_rate: Option<BigDecimal>,
    pub bio: Option<String>,
}

#[async_trait]
pub trait WorkerExt {
    /// Registers the user row and the worker profile in one transaction.
    async fn create_worker(&self, worker: NewWorker) -> Result<WorkerDetail, Error>;

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<WorkerDetail>, Error>;

    async fn list_workers(&self) -> Result<Vec<WorkerDetail>, Error>;

    async fn update_worker(
        &self,
        worker_id: Uuid,
        changes: WorkerChanges,
    ) -> Result<Option<WorkerDetail>, Error>;

    async fn delete_worker(&self, worker_id: Uuid) -> Result<bool, Error>;

    async fn get_workers_by_skill(&self, category_id: Uuid) -> Result<Vec<WorkerDetail>, Error>;

    async fn get_workers_by_city(&self, city: &str) -> Result<Vec<WorkerDetail>, Error>;

    async fn get_available_workers(&self, category_id: Uuid)
        -> Result<Vec<AvailableWorker>, Error>;

    async fn get_worker_performance(
        &self,
        worker_id: Uuid,
    ) -> Result<Option<WorkerPerformance>, Error>;

    async fn get_top_performers(&self, category_id: Uuid) -> Result<Vec<TopPerformer>, Error>;

    /// completed bookings / total bookings * 100; 0 when the worker has none.
    async fn get_worker_reliability_score(&self, worker_id: Uuid) -> Result<f64, Error>;

    async fn get_top_rated_workers(&self) -> Result<Vec<TopRatedWorker>, Error>;

    async fn add_worker_skill(
        &self,
        worker_id: Uuid,
        skill: NewWorkerSkill,
    ) -> Result<WorkerSkill, Error>;

    async fn get_worker_skills(&self, worker_id: Uuid) -> Result<Vec<WorkerSkill>, Error>;
}

const WORKER_DETAIL_SELECT: &str = r#"
    SELECT
        w.id, u.email, u.phone_number, w.first_name, w.last_name, w.date_of_birth,
        w.address, w.city, w.postal_code, w.hourly_rate, w.overall_rating,
        w.total_jobs_completed, w.bio
    FROM workers w
    JOIN users u ON u.id = w.id
"#;

#[async_trait]
impl WorkerExt for QueryClient {
    async fn create_worker(&self, worker: NewWorker) -> Result<WorkerDetail, Error> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, password_hash, phone_number, user_type)
            VALUES ($1, $2, $3, 'worker'::user_type)
            RETURNING id
            "#,
        )
        .bind(&worker.email)
        .bind(&worker.password_hash)
        .bind(&worker.phone_number)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO workers
            (id, first_name, last_name, date_of_birth, address, city, postal_code, hourly_rate, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user_id)
        .bind(&worker.first_name)
        .bind(&worker.last_name)
        .bind(worker.date_of_birth)
        .bind(&worker.address)
        .bind(&worker.city)
        .bind(&worker.postal_code)
        .bind(worker.hourly_rate)
        .bind(&worker.bio)
        .execute(&mut *tx)
        .await?;

        let detail = sqlx::query_as::<_, WorkerDetail>(&format!(
            "{WORKER_DETAIL_SELECT} WHERE w.id = $1"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(detail)
    }

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>(&format!("{WORKER_DETAIL_SELECT} WHERE w.id = $1"))
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_workers(&self) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>(&format!(
            "{WORKER_DETAIL_SELECT} ORDER BY w.first_name, w.last_name LIMIT 100"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_worker(
        &self,
        worker_id: Uuid,
        changes: WorkerChanges,
    ) -> Result<Option<WorkerDetail>, Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE workers
            SET first_name = $2, last_name = $3, date_of_birth = $4, address = $5,
                city = $6, postal_code = $7, hourly_rate = $8, bio = $9
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(worker_id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.date_of_birth)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.postal_code)
        .bind(changes.hourly_rate)
        .bind(&changes.bio)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE users SET phone_number = $2 WHERE id = $1")
            .bind(worker_id)
            .bind(&changes.phone_number)
            .execute(&mut *tx)
            .await?;

        let detail = sqlx::query_as::<_, WorkerDetail>(&format!(
            "{WORKER_DETAIL_SELECT} WHERE w.id = $1"
        ))
        .bind(worker_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(detail))
    }

    async fn delete_worker(&self, worker_id: Uuid) -> Result<bool, Error> {
        // The user row cascades to the worker profile.
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM users WHERE id = $1 AND user_type = 'worker'::user_type RETURNING id",
        )
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }

    async fn get_workers_by_skill(&self, category_id: Uuid) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>(&format!(
            r#"
            {WORKER_DETAIL_SELECT}
            WHERE EXISTS (
                SELECT 1 FROM worker_skills ws
                WHERE ws.worker_id = w.id AND ws.category_id = $1
            )
            ORDER BY w.total_jobs_completed DESC
            LIMIT 100
            "#
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_workers_by_city(&self, city: &str) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>(&format!("{WORKER_DETAIL_SELECT} WHERE w.city = $1"))
            .bind(city)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_available_workers(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AvailableWorker>, Error> {
        sqlx::query_as::<_, AvailableWorker>(
            r#"
            SELECT
                w.id,
                w.first_name || ' ' || w.last_name AS full_name,
                w.hourly_rate, w.overall_rating, w.total_jobs_completed,
                ws.skill_level, ws.years_experience
            FROM workers w
            JOIN worker_skills ws ON ws.worker_id = w.id
            WHERE ws.category_id = $1
              AND w.overall_rating >= 3.0
              AND w.total_jobs_completed > 0
            ORDER BY w.overall_rating DESC, w.total_jobs_completed DESC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_worker_performance(
        &self,
        worker_id: Uuid,
    ) -> Result<Option<WorkerPerformance>, Error> {
        sqlx::query_as::<_, WorkerPerformance>(
            r#"
            SELECT
                w.id,
                w.first_name || ' ' || w.last_name AS full_name,
                w.hourly_rate, w.overall_rating, w.total_jobs_completed,
                (SELECT COUNT(*) FROM bids b WHERE b.worker_id = w.id) AS total_bids_placed,
                (SELECT COUNT(*) FROM bids b
                 WHERE b.worker_id = w.id AND b.is_winning_bid) AS winning_bids,
                COALESCE((SELECT AVG(r.rating)::float8 FROM reviews r
                          WHERE r.reviewed_id = w.id), 0) AS average_rating,
                (SELECT COUNT(*) FROM reviews r WHERE r.reviewed_id = w.id) AS total_reviews
            FROM workers w
            WHERE w.id = $1
            "#,
        )
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_top_performers(&self, category_id: Uuid) -> Result<Vec<TopPerformer>, Error> {
        sqlx::query_as::<_, TopPerformer>(
            r#"
            SELECT
                w.id,
                w.first_name || ' ' || w.last_name AS full_name,
                w.hourly_rate, w.overall_rating, w.total_jobs_completed,
                s.total_bids, s.winning_bids,
                (CASE WHEN s.total_bids > 0
                      THEN s.winning_bids * 100.0 / s.total_bids
                      ELSE 0 END)::float8 AS win_rate_percentage
            FROM workers w
            JOIN worker_skills ws ON ws.worker_id = w.id AND ws.category_id = $1
            CROSS JOIN LATERAL (
                SELECT COUNT(*) AS total_bids,
                       COUNT(*) FILTER (WHERE b.is_winning_bid) AS winning_bids
                FROM bids b
                WHERE b.worker_id = w.id
            ) s
            ORDER BY w.overall_rating DESC NULLS LAST, w.total_jobs_completed DESC
            LIMIT 20
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_worker_reliability_score(&self, worker_id: Uuid) -> Result<f64, Error> {
        let (completed, total) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'completed'::booking_status),
                COUNT(*)
            FROM bookings
            WHERE worker_id = $1
            "#,
        )
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(crate::utils::scoring::reliability_score(completed, total))
    }

    async fn get_top_rated_workers(&self) -> Result<Vec<TopRatedWorker>, Error> {
        sqlx::query_as::<_, TopRatedWorker>(
            r#"
            SELECT
                w.id,
                w.first_name || ' ' || w.last_name AS full_name,
                w.hourly_rate, w.overall_rating, w.total_jobs_completed, w.city,
                sc.category_name, ws.skill_level,
                (SELECT COUNT(*) FROM reviews r WHERE r.reviewed_id = w.id) AS review_count,
                (SELECT AVG(r.rating)::float8 FROM reviews r
                 WHERE r.reviewed_id = w.id) AS average_rating
            FROM workers w
            LEFT JOIN worker_skills ws ON ws.worker_id = w.id
            LEFT JOIN service_categories sc ON sc.id = ws.category_id
            ORDER BY w.overall_rating DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn add_worker_skill(
        &self,
        worker_id: Uuid,
        skill: NewWorkerSkill,
    ) -> Result<WorkerSkill, Error> {
        sqlx::query_as::<_, WorkerSkill>(
            r#"
            INSERT INTO worker_skills
            (worker_id, category_id, skill_level, certification_url, certification_expiry,
             years_experience)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, worker_id, category_id, skill_level, certification_url,
                      certification_expiry, years_experience
            "#,
        )
        .bind(worker_id)
        .bind(skill.category_id)
        .bind(skill.skill_level)
        .bind(skill.certification_url)
        .bind(skill.certification_expiry)
        .bind(skill.years_experience)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_worker_skills(&self, worker_id: Uuid) -> Result<Vec<WorkerSkill>, Error> {
        sqlx::query_as::<_, WorkerSkill>(
            r#"
            SELECT id, worker_id, category_id, skill_level, certification_url,
                   certification_expiry, years_experience
            FROM worker_skills
            WHERE worker_id = $1
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl WorkerExt for ProcClient {
    async fn create_worker(&self, worker: NewWorker) -> Result<WorkerDetail, Error> {
        sqlx::query_as::<_, WorkerDetail>(
            "SELECT * FROM sp_create_worker($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(worker.email)
        .bind(worker.password_hash)
        .bind(worker.phone_number)
        .bind(worker.first_name)
        .bind(worker.last_name)
        .bind(worker.date_of_birth)
        .bind(worker.address)
        .bind(worker.city)
        .bind(worker.postal_code)
        .bind(worker.hourly_rate)
        .bind(worker.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>("SELECT * FROM fn_get_worker($1)")
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_workers(&self) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>("SELECT * FROM fn_list_workers()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_worker(
        &self,
        worker_id: Uuid,
        changes: WorkerChanges,
    ) -> Result<Option<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>(
            "SELECT * FROM sp_update_worker($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(worker_id)
        .bind(changes.phone_number)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.date_of_birth)
        .bind(changes.address)
        .bind(changes.city)
        .bind(changes.postal_code)
        .bind(changes.hourly_rate)
        .bind(changes.bio)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn delete_worker(&self, worker_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_worker($1)")
            .bind(worker_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_workers_by_skill(&self, category_id: Uuid) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>("SELECT * FROM fn_workers_by_skill($1)")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_workers_by_city(&self, city: &str) -> Result<Vec<WorkerDetail>, Error> {
        sqlx::query_as::<_, WorkerDetail>("SELECT * FROM fn_workers_by_city($1)")
            .bind(city)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_available_workers(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AvailableWorker>, Error> {
        sqlx::query_as::<_, AvailableWorker>("SELECT * FROM fn_available_workers($1)")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_worker_performance(
        &self,
        worker_id: Uuid,
    ) -> Result<Option<WorkerPerformance>, Error> {
        sqlx::query_as::<_, WorkerPerformance>("SELECT * FROM fn_worker_performance($1)")
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_top_performers(&self, category_id: Uuid) -> Result<Vec<TopPerformer>, Error> {
        sqlx::query_as::<_, TopPerformer>("SELECT * FROM fn_top_performers_by_category($1)")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_worker_reliability_score(&self, worker_id: Uuid) -> Result<f64, Error> {
        sqlx::query_scalar::<_, f64>("SELECT fn_worker_reliability_score($1)")
            .bind(worker_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_top_rated_workers(&self) -> Result<Vec<TopRatedWorker>, Error> {
        sqlx::query_as::<_, TopRatedWorker>("SELECT * FROM vw_top_rated_workers")
            .fetch_all(&self.pool)
            .await
    }

    async fn add_worker_skill(
        &self,
        worker_id: Uuid,
        skill: NewWorkerSkill,
    ) -> Result<WorkerSkill, Error> {
        sqlx::query_as::<_, WorkerSkill>("SELECT * FROM sp_add_worker_skill($1, $2, $3, $4, $5, $6)")
            .bind(worker_id)
            .bind(skill.category_id)
            .bind(skill.skill_level)
            .bind(skill.certification_url)
            .bind(skill.certification_expiry)
            .bind(skill.years_experience)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_worker_skills(&self, worker_id: Uuid) -> Result<Vec<WorkerSkill>, Error> {
        sqlx::query_as::<_, WorkerSkill>("SELECT * FROM fn_worker_skills($1)")
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }
}
