//! Booking routes. All require authentication.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use sb_core::errors::BookingError;
use sb_shared::types::ApiResponse;

use crate::dto::CreateBookingRequest;
use crate::error::{validation_error, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .wrap(JwtAuth)
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_bookings))
            .route("/upcoming", web::get().to(upcoming_bookings))
            .route("/past", web::get().to(past_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}/confirm", web::put().to(confirm_booking))
            .route("/{id}/cancel", web::put().to(cancel_booking)),
    );
}

/// POST /api/v1/bookings
async fn create_booking(
    state: web::Data<AppState>,
    ctx: AuthContext,
    payload: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(|e| validation_error(&e))?;

    let booking = state
        .booking_service
        .create(ctx.user_id, payload.into())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(booking)))
}

/// GET /api/v1/bookings
async fn list_bookings(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let bookings = state.booking_service.list_for_user(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

/// GET /api/v1/bookings/upcoming
async fn upcoming_bookings(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let bookings = state.booking_service.upcoming(ctx.user_id, today).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

/// GET /api/v1/bookings/past
async fn past_bookings(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let bookings = state.booking_service.past(ctx.user_id, today).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

/// GET /api/v1/bookings/{id}
async fn get_booking(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.booking_service.get(path.into_inner()).await?;
    // Bookings are private to their owner.
    if !booking.is_owned_by(ctx.user_id) {
        return Err(ApiError(BookingError::NotFound.into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}

/// PUT /api/v1/bookings/{id}/confirm
async fn confirm_booking(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking = state
        .booking_service
        .confirm(ctx.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}

/// PUT /api/v1/bookings/{id}/cancel
async fn cancel_booking(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking = state
        .booking_service
        .cancel(ctx.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}
