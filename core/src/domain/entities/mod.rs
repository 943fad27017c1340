//! Domain entities representing core business objects.

pub mod booking;
pub mod favorite;
pub mod notification;
pub mod otp;
pub mod room;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use favorite::Favorite;
pub use notification::{Notification, NotificationKind};
pub use otp::{OtpRecord, OTP_CODE_LENGTH, OTP_EXPIRY_MINUTES};
pub use room::{Room, RoomSummary};
pub use user::{Gender, User};
