//! Maps domain errors onto HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use sb_core::errors::{AuthError, BookingError, DomainError};
use sb_shared::types::ErrorResponse;

/// Wrapper turning a [`DomainError`] into an actix `ResponseError`.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    fn error_code(&self) -> &'static str {
        match &self.0 {
            DomainError::Validation { .. } => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Database { .. } => "database_error",
            DomainError::Internal { .. } => "internal_error",
            DomainError::Auth(e) => match e {
                AuthError::UserNotFound => "user_not_found",
                AuthError::EmailAlreadyExists => "email_already_exists",
                AuthError::PhoneAlreadyExists => "phone_already_exists",
                AuthError::InvalidCredentials => "invalid_credentials",
                AuthError::AccountNotActivated => "account_not_activated",
                AuthError::WrongOldPassword => "wrong_old_password",
                AuthError::OtpNotVerified => "otp_not_verified",
                AuthError::InvalidOtp => "invalid_otp",
                AuthError::GoogleTokenInvalid => "google_token_invalid",
                AuthError::PasswordHashFailed => "internal_error",
            },
            DomainError::Booking(e) => match e {
                BookingError::NotFound => "booking_not_found",
                BookingError::RoomNotFound => "room_not_found",
                BookingError::InvalidStayLength => "invalid_stay_length",
                BookingError::NotOwner => "forbidden",
                BookingError::AlreadyFavorite => "already_favorite",
                BookingError::FavoriteNotFound => "favorite_not_found",
                BookingError::NotificationNotFound => "notification_not_found",
            },
            DomainError::Token(_) => "unauthorized",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Database { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DomainError::Auth(e) => match e {
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::EmailAlreadyExists | AuthError::PhoneAlreadyExists => {
                    StatusCode::CONFLICT
                }
                AuthError::InvalidCredentials | AuthError::GoogleTokenInvalid => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::AccountNotActivated => StatusCode::FORBIDDEN,
                AuthError::WrongOldPassword
                | AuthError::OtpNotVerified
                | AuthError::InvalidOtp => StatusCode::BAD_REQUEST,
                AuthError::PasswordHashFailed => StatusCode::INTERNAL_SERVER_ERROR,
            },
            DomainError::Booking(e) => match e {
                BookingError::NotFound
                | BookingError::RoomNotFound
                | BookingError::FavoriteNotFound
                | BookingError::NotificationNotFound => StatusCode::NOT_FOUND,
                BookingError::InvalidStayLength => StatusCode::BAD_REQUEST,
                BookingError::NotOwner => StatusCode::FORBIDDEN,
                BookingError::AlreadyFavorite => StatusCode::CONFLICT,
            },
            DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal details stay in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Internal error: {}", self.0);
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse::new(self.error_code(), &message))
    }
}

/// Converts `validator` errors into a 400 with field context.
pub fn validation_error(errors: &validator::ValidationErrors) -> ApiError {
    ApiError(DomainError::Validation {
        message: format!("Invalid request data: {}", errors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError(AuthError::InvalidCredentials.into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError(BookingError::NotOwner.into());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = ApiError(AuthError::EmailAlreadyExists.into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError(DomainError::Database {
            message: "boom".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError(DomainError::Validation {
            message: "bad input".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "validation_error");
    }
}
