// db/statsdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::{ProcClient, QueryClient};
use crate::dtos::common::TableCounts;

#[async_trait]
pub trait StatsExt {
    async fn get_table_counts(&self) -> Result<TableCounts, Error>;
}

#[async_trait]
impl StatsExt for QueryClient {
    async fn get_table_counts(&self) -> Result<TableCounts, Error> {
        sqlx::query_as::<_, TableCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM workers) AS workers,
                (SELECT COUNT(*) FROM customers) AS customers,
                (SELECT COUNT(*) FROM service_categories) AS service_categories,
                (SELECT COUNT(*) FROM jobs) AS jobs,
                (SELECT COUNT(*) FROM bids) AS bids,
                (SELECT COUNT(*) FROM bookings) AS bookings,
                (SELECT COUNT(*) FROM reviews) AS reviews,
                (SELECT COUNT(*) FROM notifications) AS notifications
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }
}

#[async_trait]
impl StatsExt for ProcClient {
    async fn get_table_counts(&self) -> Result<TableCounts, Error> {
        sqlx::query_as::<_, TableCounts>("SELECT * FROM fn_table_counts()")
            .fetch_one(&self.pool)
            .await
    }
}
