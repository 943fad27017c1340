//! Business services containing domain logic and use cases.

pub mod auth;
pub mod booking;
pub mod favorite;
pub mod notification;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use auth::{
    AuthResponse, AuthService, GoogleProfile, GoogleTokenVerifier, NewUser, ProfileUpdate,
    ProfileUpdateOutcome,
};
pub use booking::{BookingService, NewBooking};
pub use favorite::{FavoriteItem, FavoriteService};
pub use notification::NotificationService;
pub use otp::{Clock, DeliveryError, DeliveryGateway, OtpService, SystemClock};
pub use token::{Claims, TokenService};
