use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: DateTime<Utc>,
    pub is_disputed: bool,
    pub dispute_resolution: Option<String>,
    pub was_helpful: i32,
}

/// Side-effect record written by workflow transitions; only the read flag
/// ever changes after insert.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub created_date: DateTime<Utc>,
    pub is_read: bool,
    pub related_entity_id: Option<Uuid>,
    pub related_entity_type: Option<String>,
}
