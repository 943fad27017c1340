//! In-app notification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    BookingSuccess,
    BookingConfirmed,
    BookingCancelled,
}

/// An in-app notification shown in the user's feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for the notification
    pub id: Uuid,

    /// Recipient user
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Notification body
    pub message: String,

    /// Event kind
    pub kind: NotificationKind,

    /// Whether the user has read the notification
    pub is_read: bool,

    /// Booking this notification refers to, if any
    pub related_booking_id: Option<Uuid>,

    /// Timestamp when the notification was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        title: String,
        message: String,
        kind: NotificationKind,
        related_booking_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            message,
            kind,
            is_read: false,
            related_booking_id,
            created_at: Utc::now(),
        }
    }

    /// Marks the notification as read.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Whether this notification belongs to the given user.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let notification = Notification::new(
            Uuid::new_v4(),
            "Booking placed".to_string(),
            "Your booking is pending confirmation".to_string(),
            NotificationKind::BookingSuccess,
            Some(Uuid::new_v4()),
        );
        assert!(!notification.is_read);
    }
}
