//! MySQL repository implementations.

mod booking_repository_impl;
mod favorite_repository_impl;
mod notification_repository_impl;
mod otp_repository_impl;
mod room_repository_impl;
mod user_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use favorite_repository_impl::MySqlFavoriteRepository;
pub use notification_repository_impl::MySqlNotificationRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use room_repository_impl::MySqlRoomRepository;
pub use user_repository_impl::MySqlUserRepository;

use sb_core::errors::DomainError;

/// Wraps a SQLx error into the domain database error.
pub(crate) fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", context, e),
    }
}
