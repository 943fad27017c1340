//! Repository interfaces (and in-memory mocks) for data persistence.
//!
//! The traits define the contract between the domain layer and the
//! infrastructure layer. Mock implementations back the service tests.

pub mod booking;
pub mod favorite;
pub mod notification;
pub mod otp;
pub mod room;
pub mod user;

pub use booking::{BookingRepository, MockBookingRepository};
pub use favorite::{FavoriteRepository, MockFavoriteRepository};
pub use notification::{MockNotificationRepository, NotificationRepository};
pub use otp::{MockOtpRepository, OtpRepository};
pub use room::{MockRoomRepository, RoomRepository};
pub use user::{MockUserRepository, UserRepository};
