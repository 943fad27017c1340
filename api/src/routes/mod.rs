//! Route handlers grouped by resource.

pub mod auth;
pub mod bookings;
pub mod favorites;
pub mod notifications;

use actix_web::{web, HttpResponse};
use serde_json::json;

use sb_shared::types::ErrorResponse;

/// Liveness probe.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "staybooking-api",
        "timestamp": chrono::Utc::now(),
    }))
}

/// Fallback for unmatched paths.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("not_found", "Resource not found"))
}

/// Registers every `/api/v1` route on the service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(bookings::configure)
            .configure(favorites::configure)
            .configure(notifications::configure),
    );
}
