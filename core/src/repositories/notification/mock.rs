//! Mock implementation of NotificationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::errors::DomainError;

use super::repository::NotificationRepository;

/// In-memory notification repository for tests
#[derive(Default)]
pub struct MockNotificationRepository {
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl MockNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_unread_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as u64)
    }

    async fn create(&self, notification: Notification) -> Result<Notification, DomainError> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn update(&self, notification: Notification) -> Result<Notification, DomainError> {
        let mut notifications = self.notifications.write().await;
        if !notifications.contains_key(&notification.id) {
            return Err(DomainError::NotFound {
                resource: "Notification".to_string(),
            });
        }
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        for notification in notifications.values_mut() {
            if notification.user_id == user_id {
                notification.is_read = true;
            }
        }
        Ok(())
    }
}
