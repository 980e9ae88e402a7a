// db/jobdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::dtos::jobdtos::{ActiveJobWithBids, JobListing};
use crate::models::jobmodel::{Job, JobStatus, UrgencyLevel};

pub struct NewJob {
    pub customer_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<BigDecimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    pub urgency_level: Option<UrgencyLevel>,
    pub required_workers: i32,
}

pub struct JobChanges {
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<BigDecimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
    pub urgency_level: Option<UrgencyLevel>,
    pub required_workers: i32,
}

#[async_trait]
pub trait JobExt {
    async fn create_job(&self, job: NewJob) -> Result<Job, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn list_jobs(&self) -> Result<Vec<JobListing>, Error>;

    async fn update_job(&self, job_id: Uuid, changes: JobChanges) -> Result<Option<Job>, Error>;

    async fn delete_job(&self, job_id: Uuid) -> Result<bool, Error>;

    async fn get_open_jobs(&self) -> Result<Vec<JobListing>, Error>;

    async fn get_jobs_by_category(&self, category_id: Uuid) -> Result<Vec<JobListing>, Error>;

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<JobListing>, Error>;

    async fn get_jobs_by_location(
        &self,
        city: &str,
        category_id: Uuid,
    ) -> Result<Vec<JobListing>, Error>;

    async fn get_active_jobs_with_bids(&self) -> Result<Vec<ActiveJobWithBids>, Error>;
}

const JOB_COLUMNS: &str = r#"
    id, customer_id, category_id, title, description, budget, posted_date,
    start_date, end_date, location, latitude, longitude, status, urgency_level,
    required_workers, completed_workers
"#;

const JOB_LISTING_SELECT: &str = r#"
    SELECT
        j.id, j.customer_id, j.category_id, j.title, j.description, j.budget,
        j.posted_date, j.location, j.status, j.urgency_level,
        j.required_workers, j.completed_workers,
        c.first_name || ' ' || c.last_name AS customer_name,
        sc.category_name
    FROM jobs j
    JOIN customers c ON c.id = j.customer_id
    JOIN service_categories sc ON sc.id = j.category_id
"#;

#[async_trait]
impl JobExt for QueryClient {
    async fn create_job(&self, job: NewJob) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
            (customer_id, category_id, title, description, budget, start_date,
             end_date, location, latitude, longitude, urgency_level, required_workers)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job.customer_id)
        .bind(job.category_id)
        .bind(job.title)
        .bind(job.description)
        .bind(job.budget)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.location)
        .bind(job.latitude)
        .bind(job.longitude)
        .bind(job.urgency_level)
        .bind(job.required_workers)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_jobs(&self) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>(&format!(
            "{JOB_LISTING_SELECT} ORDER BY j.posted_date DESC LIMIT 100"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_job(&self, job_id: Uuid, changes: JobChanges) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, budget = $4, start_date = $5,
                end_date = $6, location = $7, status = COALESCE($8, status),
                urgency_level = $9, required_workers = $10
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.budget)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.location)
        .bind(changes.status)
        .bind(changes.urgency_level)
        .bind(changes.required_workers)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_job(&self, job_id: Uuid) -> Result<bool, Error> {
        let deleted = sqlx::query_scalar::<_, Uuid>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted.is_some())
    }

    async fn get_open_jobs(&self) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>(&format!(
            "{JOB_LISTING_SELECT} WHERE j.status = 'open'::job_status ORDER BY j.posted_date DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_category(&self, category_id: Uuid) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>(&format!(
            "{JOB_LISTING_SELECT} WHERE j.category_id = $1 ORDER BY j.posted_date DESC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>(&format!(
            "{JOB_LISTING_SELECT} WHERE j.customer_id = $1 ORDER BY j.posted_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_location(
        &self,
        city: &str,
        category_id: Uuid,
    ) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>(&format!(
            r#"
            {JOB_LISTING_SELECT}
            WHERE j.location ILIKE '%' || $1 || '%'
              AND j.category_id = $2
              AND j.status IN ('open'::job_status, 'assigned'::job_status)
            ORDER BY j.posted_date DESC
            "#
        ))
        .bind(city)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_jobs_with_bids(&self) -> Result<Vec<ActiveJobWithBids>, Error> {
        sqlx::query_as::<_, ActiveJobWithBids>(
            r#"
            SELECT
                j.id, j.title, j.budget, j.status, j.urgency_level, j.posted_date,
                j.required_workers,
                c.first_name || ' ' || c.last_name AS customer_name,
                sc.category_name,
                (SELECT COUNT(*) FROM bids b WHERE b.job_id = j.id) AS total_bids,
                (SELECT COUNT(*) FROM bids b
                 WHERE b.job_id = j.id AND b.status = 'accepted'::bid_status) AS accepted_bids
            FROM jobs j
            JOIN customers c ON c.id = j.customer_id
            JOIN service_categories sc ON sc.id = j.category_id
            WHERE j.status IN ('open'::job_status, 'assigned'::job_status)
            ORDER BY j.posted_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl JobExt for ProcClient {
    async fn create_job(&self, job: NewJob) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            "SELECT * FROM sp_create_job($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(job.customer_id)
        .bind(job.category_id)
        .bind(job.title)
        .bind(job.description)
        .bind(job.budget)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.location)
        .bind(job.latitude)
        .bind(job.longitude)
        .bind(job.urgency_level)
        .bind(job.required_workers)
        .fetch_one(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>("SELECT * FROM fn_get_job($1)")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_jobs(&self) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>("SELECT * FROM fn_list_jobs()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_job(&self, job_id: Uuid, changes: JobChanges) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            "SELECT * FROM sp_update_job($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(job_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.budget)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.location)
        .bind(changes.status)
        .bind(changes.urgency_level)
        .bind(changes.required_workers)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn delete_job(&self, job_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_job($1)")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_open_jobs(&self) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>("SELECT * FROM fn_open_jobs()")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_jobs_by_category(&self, category_id: Uuid) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>("SELECT * FROM fn_jobs_by_category($1)")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>("SELECT * FROM fn_jobs_by_customer($1)")
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_jobs_by_location(
        &self,
        city: &str,
        category_id: Uuid,
    ) -> Result<Vec<JobListing>, Error> {
        sqlx::query_as::<_, JobListing>("SELECT * FROM fn_jobs_by_location($1, $2)")
            .bind(city)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_active_jobs_with_bids(&self) -> Result<Vec<ActiveJobWithBids>, Error> {
        sqlx::query_as::<_, ActiveJobWithBids>("SELECT * FROM vw_active_jobs_with_bids")
            .fetch_all(&self.pool)
            .await
    }
}
