// service/report_service.rs
use std::sync::Arc;

use num_traits::ToPrimitive;
use uuid::Uuid;

use crate::{
    db::{
        biddb::BidExt, bookingdb::BookingExt, customerdb::CustomerExt, db::DataStore,
        jobdb::JobExt, statsdb::StatsExt, workerdb::WorkerExt,
    },
    dtos::{
        biddtos::BidStats,
        bookingdtos::BookingSummaryByCategory,
        common::TableCounts,
        customerdtos::CustomerAnalytics,
        jobdtos::{ActiveJobWithBids, JobComplexity},
        workerdtos::{
            AvailableWorker, TopPerformer, TopRatedWorker, WorkerPerformance, WorkerReliability,
        },
    },
    service::error::ServiceError,
    utils::scoring,
};

/// Read-only aggregates over the current store snapshot. No caching, no
/// incremental maintenance; either store variant serves the same contracts.
#[derive(Debug, Clone)]
pub struct ReportService {
    store: Arc<dyn DataStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn bid_stats(&self, job_id: Uuid) -> Result<BidStats, ServiceError> {
        Ok(self.store.get_bid_stats(job_id).await?)
    }

    pub async fn job_complexity(&self, job_id: Uuid) -> Result<JobComplexity, ServiceError> {
        let job = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        Ok(JobComplexity {
            job_id,
            complexity_score: scoring::complexity_score(
                job.budget.as_ref().and_then(|b| b.to_f64()),
                job.urgency_level,
                job.required_workers,
            ),
        })
    }

    pub async fn worker_performance(
        &self,
        worker_id: Uuid,
    ) -> Result<WorkerPerformance, ServiceError> {
        self.store
            .get_worker_performance(worker_id)
            .await?
            .ok_or(ServiceError::WorkerNotFound(worker_id))
    }

    pub async fn worker_reliability(
        &self,
        worker_id: Uuid,
    ) -> Result<WorkerReliability, ServiceError> {
        self.store
            .get_worker_by_id(worker_id)
            .await?
            .ok_or(ServiceError::WorkerNotFound(worker_id))?;

        let reliability_score = self.store.get_worker_reliability_score(worker_id).await?;

        Ok(WorkerReliability {
            worker_id,
            reliability_score,
        })
    }

    pub async fn top_performers(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<TopPerformer>, ServiceError> {
        Ok(self.store.get_top_performers(category_id).await?)
    }

    pub async fn top_rated_workers(&self) -> Result<Vec<TopRatedWorker>, ServiceError> {
        Ok(self.store.get_top_rated_workers().await?)
    }

    pub async fn available_workers(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AvailableWorker>, ServiceError> {
        Ok(self.store.get_available_workers(category_id).await?)
    }

    pub async fn booking_summary_by_category(
        &self,
    ) -> Result<Vec<BookingSummaryByCategory>, ServiceError> {
        Ok(self.store.get_booking_summary_by_category().await?)
    }

    pub async fn customer_analytics(&self) -> Result<Vec<CustomerAnalytics>, ServiceError> {
        Ok(self.store.get_customer_analytics().await?)
    }

    pub async fn active_jobs_with_bids(&self) -> Result<Vec<ActiveJobWithBids>, ServiceError> {
        Ok(self.store.get_active_jobs_with_bids().await?)
    }

    pub async fn table_counts(&self) -> Result<TableCounts, ServiceError> {
        Ok(self.store.get_table_counts().await?)
    }
}
