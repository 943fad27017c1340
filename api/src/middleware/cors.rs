//! CORS configuration.

use actix_cors::Cors;
use actix_web::http::header;

/// Permissive defaults suitable for a browser frontend during development.
/// Lock down `allowed_origin` before exposing the API publicly.
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600)
}
