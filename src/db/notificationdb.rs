// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::models::reviewmodel::Notification;

#[async_trait]
pub trait NotificationExt {
    /// Notifications are only ever created by workflow transitions.
    async fn get_notifications_by_user(&self, user_id: Uuid)
        -> Result<Vec<Notification>, Error>;

    /// The read flag is the only mutable part of a notification.
    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, Error>;
}

const NOTIFICATION_COLUMNS: &str = r#"
    id, user_id, notification_type, title, message, created_date, is_read,
    related_entity_id, related_entity_type
"#;

#[async_trait]
impl NotificationExt for QueryClient {
    async fn get_notifications_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_date DESC
            LIMIT 100
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET is_read = true
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl NotificationExt for ProcClient {
    async fn get_notifications_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>("SELECT * FROM fn_notifications_by_user($1)")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, Error> {
        sqlx::query_as::<_, Notification>("SELECT * FROM sp_mark_notification_read($1)")
            .bind(notification_id)
            .fetch_optional(&self.pool)
            .await
    }
}
