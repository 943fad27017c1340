//! In-app notification feed.

mod service;

pub use service::NotificationService;
