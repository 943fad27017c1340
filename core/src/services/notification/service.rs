//! Notification service implementation.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::errors::{BookingError, DomainResult};
use crate::repositories::NotificationRepository;

/// Notification feed use cases.
pub struct NotificationService<N: NotificationRepository> {
    notification_repository: Arc<N>,
}

impl<N: NotificationRepository> NotificationService<N> {
    pub fn new(notification_repository: Arc<N>) -> Self {
        Self {
            notification_repository,
        }
    }

    /// Full feed for a user, newest first.
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        self.notification_repository.find_by_user(user_id).await
    }

    /// Unread notifications only, newest first.
    pub async fn unread(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        self.notification_repository
            .find_unread_by_user(user_id)
            .await
    }

    /// Number of unread notifications (for the badge counter).
    pub async fn unread_count(&self, user_id: Uuid) -> DomainResult<u64> {
        self.notification_repository.count_unread(user_id).await
    }

    /// Marks one notification as read. Only the recipient may do so.
    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> DomainResult<Notification> {
        let mut notification = self
            .notification_repository
            .find_by_id(notification_id)
            .await?
            .ok_or(BookingError::NotificationNotFound)?;

        if !notification.is_owned_by(user_id) {
            return Err(BookingError::NotOwner.into());
        }

        notification.mark_read();
        self.notification_repository.update(notification).await
    }

    /// Marks every notification of the user as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> DomainResult<()> {
        self.notification_repository.mark_all_read(user_id).await
    }

    /// Appends a notification to a user's feed.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: String,
        message: String,
        kind: NotificationKind,
        related_booking_id: Option<Uuid>,
    ) -> DomainResult<Notification> {
        let notification = Notification::new(user_id, title, message, kind, related_booking_id);
        self.notification_repository.create(notification).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use crate::repositories::MockNotificationRepository;

    fn service() -> NotificationService<MockNotificationRepository> {
        NotificationService::new(Arc::new(MockNotificationRepository::new()))
    }

    async fn seed(service: &NotificationService<MockNotificationRepository>, user_id: Uuid) -> Notification {
        service
            .create(
                user_id,
                "Booking placed".to_string(),
                "Your booking is pending confirmation".to_string(),
                NotificationKind::BookingSuccess,
                None,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unread_count_tracks_reads() {
        let service = service();
        let user_id = Uuid::new_v4();

        let first = seed(&service, user_id).await;
        seed(&service, user_id).await;
        assert_eq!(service.unread_count(user_id).await.unwrap(), 2);

        service.mark_read(user_id, first.id).await.unwrap();
        assert_eq!(service.unread_count(user_id).await.unwrap(), 1);
        assert_eq!(service.unread(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_is_owner_only() {
        let service = service();
        let user_id = Uuid::new_v4();
        let notification = seed(&service, user_id).await;

        let err = service
            .mark_read(Uuid::new_v4(), notification.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Booking(BookingError::NotOwner)));
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let service = service();
        let user_id = Uuid::new_v4();
        seed(&service, user_id).await;
        seed(&service, user_id).await;

        service.mark_all_read(user_id).await.unwrap();
        assert_eq!(service.unread_count(user_id).await.unwrap(), 0);
        assert_eq!(service.list(user_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_notification() {
        let service = service();
        let err = service
            .mark_read(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Booking(BookingError::NotificationNotFound)
        ));
    }
}
