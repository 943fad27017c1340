mod mock;
mod repository;

pub use mock::MockNotificationRepository;
pub use repository::NotificationRepository;
