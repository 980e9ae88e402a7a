// db/db.rs
use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::config::DataAccess;

use super::{
    biddb::BidExt, bookingdb::BookingExt, categorydb::CategoryExt, customerdb::CustomerExt,
    jobdb::JobExt, notificationdb::NotificationExt, reviewdb::ReviewExt, statsdb::StatsExt,
    workerdb::WorkerExt,
};

/// Guard tags carried through `sqlx::Error::Protocol` by both store
/// implementations, so callers map them uniformly.
pub mod guard {
    pub const JOB_NOT_OPEN: &str = "job_not_open";
    pub const DUPLICATE_PENDING_BID: &str = "duplicate_pending_bid";
    pub const BOOKING_ALREADY_COMPLETED: &str = "booking_already_completed";
    pub const COMPLETED_BOOKING_RETAINED: &str = "completed_booking_retained";
    pub const BOOKING_CODE_EXHAUSTED: &str = "booking_code_exhausted";
}

/// The full store contract. Both data-access variants implement every
/// extension trait with identical output contracts.
pub trait DataStore:
    JobExt
    + BidExt
    + BookingExt
    + WorkerExt
    + CustomerExt
    + CategoryExt
    + ReviewExt
    + NotificationExt
    + StatsExt
    + Send
    + Sync
    + std::fmt::Debug
{
}

/// Data access via inline sqlx queries composed in Rust.
#[derive(Debug, Clone)]
pub struct QueryClient {
    pub pool: Pool<Postgres>,
}

impl QueryClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        QueryClient { pool }
    }
}

/// Data access via stored routines and views defined in migrations.
#[derive(Debug, Clone)]
pub struct ProcClient {
    pub pool: Pool<Postgres>,
}

impl ProcClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        ProcClient { pool }
    }
}

impl DataStore for QueryClient {}
impl DataStore for ProcClient {}

/// The strategy is fixed at construction time; there is no runtime toggle.
pub fn build_store(pool: Pool<Postgres>, data_access: DataAccess) -> Arc<dyn DataStore> {
    match data_access {
        DataAccess::Query => Arc::new(QueryClient::new(pool)),
        DataAccess::Proc => Arc::new(ProcClient::new(pool)),
    }
}

/// Stored routines signal guard violations through custom SQLSTATEs.
/// Fold them into the same `Protocol` tags the query client raises.
pub(crate) fn routine_error(err: sqlx::Error) -> sqlx::Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(code) = db_err.code() {
            let tag = match code.as_ref() {
                "SC001" => Some(guard::JOB_NOT_OPEN),
                "SC002" => Some(guard::DUPLICATE_PENDING_BID),
                "SC003" => Some(guard::BOOKING_ALREADY_COMPLETED),
                "SC004" => Some(guard::COMPLETED_BOOKING_RETAINED),
                "SC005" => Some(guard::BOOKING_CODE_EXHAUSTED),
                "P0002" => return sqlx::Error::RowNotFound,
                _ => None,
            };

            if let Some(tag) = tag {
                return sqlx::Error::Protocol(tag.into());
            }
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn store_variants_construct() {
        let pool = PgPool::connect_lazy("postgres://localhost/serviceconnect").unwrap();

        let query_store = build_store(pool.clone(), DataAccess::Query);
        assert!(format!("{:?}", query_store).contains("QueryClient"));

        let proc_store = build_store(pool, DataAccess::Proc);
        assert!(format!("{:?}", proc_store).contains("ProcClient"));
    }

    #[test]
    fn routine_error_passes_unknown_errors_through() {
        let err = routine_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, sqlx::Error::RowNotFound));

        let err = routine_error(sqlx::Error::Protocol("boom".into()));
        assert!(matches!(err, sqlx::Error::Protocol(_)));
    }
}
