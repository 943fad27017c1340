//! Notification routes. All require authentication.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sb_shared::types::ApiResponse;

use crate::dto::UnreadCountResponse;
use crate::error::ApiError;
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .wrap(JwtAuth)
            .route("", web::get().to(list_notifications))
            .route("/unread", web::get().to(unread_notifications))
            .route("/unread-count", web::get().to(unread_count))
            .route("/read-all", web::put().to(mark_all_read))
            .route("/{id}/read", web::put().to(mark_read)),
    );
}

/// GET /api/v1/notifications
async fn list_notifications(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let notifications = state.notification_service.list(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(notifications)))
}

/// GET /api/v1/notifications/unread
async fn unread_notifications(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let notifications = state.notification_service.unread(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(notifications)))
}

/// GET /api/v1/notifications/unread-count
async fn unread_count(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let count = state.notification_service.unread_count(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UnreadCountResponse { count })))
}

/// PUT /api/v1/notifications/{id}/read
async fn mark_read(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let notification = state
        .notification_service
        .mark_read(ctx.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(notification)))
}

/// PUT /api/v1/notifications/read-all
async fn mark_all_read(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse, ApiError> {
    state.notification_service.mark_all_read(ctx.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("All notifications marked read")))
}
