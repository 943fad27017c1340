//! Notification repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::errors::DomainError;

/// Repository contract for [`Notification`] entities.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find a notification by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError>;

    /// All notifications of a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError>;

    /// Unread notifications of a user, newest first
    async fn find_unread_by_user(&self, user_id: Uuid)
        -> Result<Vec<Notification>, DomainError>;

    /// Number of unread notifications for a user
    async fn count_unread(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Persist a new notification
    async fn create(&self, notification: Notification) -> Result<Notification, DomainError>;

    /// Update an existing notification
    async fn update(&self, notification: Notification) -> Result<Notification, DomainError>;

    /// Mark every notification of a user as read
    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), DomainError>;
}
