//! Domain-specific error type definitions.
//!
//! Presentation-layer mapping to HTTP status codes and response bodies
//! lives in the API crate; these enums carry only the domain meaning.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Phone number already registered")]
    PhoneAlreadyExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not activated")]
    AccountNotActivated,

    #[error("Old password does not match")]
    WrongOldPassword,

    #[error("OTP has not been verified for this account")]
    OtpNotVerified,

    #[error("Invalid or expired OTP code")]
    InvalidOtp,

    #[error("Google token verification failed")]
    GoogleTokenInvalid,

    #[error("Password hashing failed")]
    PasswordHashFailed,
}

/// Booking lifecycle errors
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Stay must be at least one night")]
    InvalidStayLength,

    #[error("Booking belongs to another user")]
    NotOwner,

    #[error("Room already in favorites")]
    AlreadyFavorite,

    #[error("Favorite not found")]
    FavoriteNotFound,

    #[error("Notification not found")]
    NotificationNotFound,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
