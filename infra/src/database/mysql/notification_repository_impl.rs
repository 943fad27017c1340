//! MySQL implementation of the NotificationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::notification::{Notification, NotificationKind};
use sb_core::errors::DomainError;
use sb_core::repositories::NotificationRepository;

use super::db_err;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, title, message, kind, is_read, related_booking_id, created_at";

/// MySQL-backed notification persistence.
pub struct MySqlNotificationRepository {
    pool: MySqlPool,
}

impl MySqlNotificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_notification(row: &sqlx::mysql::MySqlRow) -> Result<Notification, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_err("Failed to get user_id", e))?;
        let related: Option<String> = row
            .try_get("related_booking_id")
            .map_err(|e| db_err("Failed to get related_booking_id", e))?;

        let kind: String = row
            .try_get("kind")
            .map_err(|e| db_err("Failed to get kind", e))?;
        let kind = match kind.as_str() {
            "BOOKING_SUCCESS" => NotificationKind::BookingSuccess,
            "BOOKING_CONFIRMED" => NotificationKind::BookingConfirmed,
            "BOOKING_CANCELLED" => NotificationKind::BookingCancelled,
            other => {
                return Err(DomainError::Database {
                    message: format!("Unknown notification kind: {}", other),
                })
            }
        };

        let related_booking_id = match related {
            Some(s) => Some(Uuid::parse_str(&s).map_err(|e| db_err("Invalid UUID", e))?),
            None => None,
        };

        Ok(Notification {
            id: Uuid::parse_str(&id).map_err(|e| db_err("Invalid UUID", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_err("Invalid UUID", e))?,
            title: row
                .try_get("title")
                .map_err(|e| db_err("Failed to get title", e))?,
            message: row
                .try_get("message")
                .map_err(|e| db_err("Failed to get message", e))?,
            kind,
            is_read: row
                .try_get("is_read")
                .map_err(|e| db_err("Failed to get is_read", e))?,
            related_booking_id,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
        })
    }

    fn kind_str(kind: NotificationKind) -> &'static str {
        match kind {
            NotificationKind::BookingSuccess => "BOOKING_SUCCESS",
            NotificationKind::BookingConfirmed => "BOOKING_CONFIRMED",
            NotificationKind::BookingCancelled => "BOOKING_CANCELLED",
        }
    }
}

#[async_trait]
impl NotificationRepository for MySqlNotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError> {
        let query = format!(
            "SELECT {} FROM notifications WHERE id = ? LIMIT 1",
            NOTIFICATION_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_notification(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        let query = format!(
            "SELECT {} FROM notifications WHERE user_id = ? ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_notification).collect()
    }

    async fn find_unread_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, DomainError> {
        let query = format!(
            "SELECT {} FROM notifications \
             WHERE user_id = ? AND is_read = FALSE ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_notification).collect()
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = FALSE",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;
        Ok(count as u64)
    }

    async fn create(&self, notification: Notification) -> Result<Notification, DomainError> {
        let query = r#"
            INSERT INTO notifications (id, user_id, title, message, kind,
                                       is_read, related_booking_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(notification.id.to_string())
            .bind(notification.user_id.to_string())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(Self::kind_str(notification.kind))
            .bind(notification.is_read)
            .bind(notification.related_booking_id.map(|id| id.to_string()))
            .bind(notification.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to insert notification", e))?;

        Ok(notification)
    }

    async fn update(&self, notification: Notification) -> Result<Notification, DomainError> {
        let result = sqlx::query("UPDATE notifications SET is_read = ? WHERE id = ?")
            .bind(notification.is_read)
            .bind(notification.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update notification", e))?;

        if result.rows_affected() == 0 && self.find_by_id(notification.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "Notification".to_string(),
            });
        }

        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to mark notifications read", e))?;
        Ok(())
    }
}
