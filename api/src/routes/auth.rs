//! Authentication and account routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::errors::AuthError;
use sb_core::services::ProfileUpdateOutcome;
use sb_shared::types::ApiResponse;

use crate::dto::{
    AuthResponseBody, ChangePasswordRequest, ForgotPasswordRequest, GoogleSignInRequest,
    LoginRequest, ProfileUpdateResponse, RegisterRequest, ResendOtpRequest, ResetPasswordRequest,
    SetPasswordRequest, UpdateProfileRequest, UserResponse, VerifyOtpRequest,
};
use crate::error::{validation_error, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/verify-otp", web::post().to(verify_otp))
            .route("/resend-otp", web::post().to(resend_otp))
            .route("/set-password", web::post().to(set_password))
            .route("/login", web::post().to(login))
            .route("/google", web::post().to(google_sign_in))
            .route("/forgot-password", web::post().to(forgot_password))
            .route("/reset-password", web::post().to(reset_password))
            .service(
                web::scope("")
                    .wrap(JwtAuth)
                    .route("/change-password", web::post().to(change_password))
                    .route("/profile", web::get().to(get_profile))
                    .route("/profile", web::put().to(update_profile)),
            ),
    );
}

/// POST /api/v1/auth/register
async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let user = state.auth_service.register(payload.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(user))))
}

/// POST /api/v1/auth/verify-otp
async fn verify_otp(
    state: web::Data<AppState>,
    payload: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let verified = state
        .otp_service
        .verify(&payload.code, &payload.phone_number)
        .await?;

    if !verified {
        return Err(ApiError(AuthError::InvalidOtp.into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP verified")))
}

/// POST /api/v1/auth/resend-otp
async fn resend_otp(
    state: web::Data<AppState>,
    payload: web::Json<ResendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    state.otp_service.resend(&payload.phone_number).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP sent")))
}

/// POST /api/v1/auth/set-password
async fn set_password(
    state: web::Data<AppState>,
    payload: web::Json<SetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    state
        .auth_service
        .set_password(&payload.phone_number, &payload.password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Account activated")))
}

/// POST /api/v1/auth/login
async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let resp = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponseBody::from(resp))))
}

/// POST /api/v1/auth/google
async fn google_sign_in(
    state: web::Data<AppState>,
    payload: web::Json<GoogleSignInRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let resp = state
        .auth_service
        .login_with_google(&payload.access_token)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponseBody::from(resp))))
}

/// POST /api/v1/auth/forgot-password
async fn forgot_password(
    state: web::Data<AppState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    state
        .auth_service
        .forgot_password(&payload.phone_number)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Password reset OTP sent")))
}

/// POST /api/v1/auth/reset-password
async fn reset_password(
    state: web::Data<AppState>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    state
        .auth_service
        .reset_password(&payload.phone_number, &payload.code, &payload.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Password reset")))
}

/// POST /api/v1/auth/change-password
async fn change_password(
    state: web::Data<AppState>,
    ctx: AuthContext,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    state
        .auth_service
        .change_password(ctx.user_id, &payload.old_password, &payload.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Password changed")))
}

/// GET /api/v1/auth/profile
async fn get_profile(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let user = state.auth_service.current_user(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// PUT /api/v1/auth/profile
async fn update_profile(
    state: web::Data<AppState>,
    ctx: AuthContext,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let outcome = state
        .auth_service
        .update_profile(ctx.user_id, payload.into())
        .await?;

    let body = match outcome {
        ProfileUpdateOutcome::Updated(user) => ProfileUpdateResponse {
            otp_required: false,
            user: Some(user.into()),
        },
        ProfileUpdateOutcome::OtpRequired => ProfileUpdateResponse {
            otp_required: true,
            user: None,
        },
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}
