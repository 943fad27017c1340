//! Authentication and profile DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sb_shared::validation;

use sb_core::domain::entities::otp::OTP_CODE_LENGTH;
use sb_core::domain::{Gender, User};
use sb_core::services::{AuthResponse, NewUser, ProfileUpdate};

/// Registration payload. The account stays disabled until the OTP is
/// verified and a password is set.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    pub date_of_birth: Option<NaiveDate>,

    pub gender: Option<Gender>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone_number: req.phone_number,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    #[validate(custom = "validate_otp_code")]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GoogleSignInRequest {
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom = "validate_phone")]
    pub phone_number: String,

    #[validate(custom = "validate_otp_code")]
    pub code: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

/// Profile update payload. Supplying a new `phone_number` without
/// `otp_code` starts the contact-change OTP round-trip; repeating the
/// request with the code applies it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub phone_number: Option<String>,

    pub otp_code: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    pub gender: Option<Gender>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone_number: req.phone_number,
            otp_code: req.otp_code,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
        }
    }
}

fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if validation::is_valid_phone(phone) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("phone_number");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

fn validate_otp_code(code: &str) -> Result<(), validator::ValidationError> {
    if validation::is_valid_otp_format(code, OTP_CODE_LENGTH) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("otp_code");
        err.message = Some("Code must be 4 digits".into());
        Err(err)
    }
}

/// User payload returned to clients. Never exposes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth,
            gender: user.gender,
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

/// Login result: the user plus a bearer token.
#[derive(Debug, Serialize)]
pub struct AuthResponseBody {
    pub user: UserResponse,
    pub access_token: String,
}

impl From<AuthResponse> for AuthResponseBody {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user: resp.user.into(),
            access_token: resp.access_token,
        }
    }
}

/// Outcome of a profile update request.
#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    /// `true` when the change needs an OTP sent to the new phone number
    /// before it can be applied.
    pub otp_required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new(
            "Minh Tran".to_string(),
            "minh@example.com".to_string(),
            "0912345678".to_string(),
            "$2b$12$secret-hash".to_string(),
        );

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
        assert!(json.contains("minh@example.com"));
    }

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            full_name: "".to_string(),
            email: "not-an-email".to_string(),
            phone_number: "123".to_string(),
            date_of_birth: None,
            gender: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_verify_otp_code_length_follows_domain_constant() {
        let req = VerifyOtpRequest {
            phone_number: "0912345678".to_string(),
            code: "1".repeat(OTP_CODE_LENGTH + 1),
        };
        assert!(req.validate().is_err());

        let req = VerifyOtpRequest {
            phone_number: "0912345678".to_string(),
            code: "1".repeat(OTP_CODE_LENGTH),
        };
        assert!(req.validate().is_ok());
    }
}
