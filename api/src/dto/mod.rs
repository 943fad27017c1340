//! Request and response DTOs.

pub mod auth;
pub mod booking;
pub mod favorite;
pub mod notification;

pub use auth::{
    AuthResponseBody, ChangePasswordRequest, ForgotPasswordRequest, GoogleSignInRequest,
    LoginRequest, ProfileUpdateResponse, RegisterRequest, ResendOtpRequest, ResetPasswordRequest,
    SetPasswordRequest, UpdateProfileRequest, UserResponse, VerifyOtpRequest,
};
pub use booking::CreateBookingRequest;
pub use favorite::{AddFavoriteRequest, FavoriteStatusResponse};
pub use notification::UnreadCountResponse;
