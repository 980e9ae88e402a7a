use serde::{Deserialize, Serialize};

//Response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TableCounts {
    pub users: i64,
    pub workers: i64,
    pub customers: i64,
    pub service_categories: i64,
    pub jobs: i64,
    pub bids: i64,
    pub bookings: i64,
    pub reviews: i64,
    pub notifications: i64,
}

#[derive(Debug, Serialize)]
pub struct DataAccessInfo {
    pub data_access: &'static str,
}
