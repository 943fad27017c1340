//! Application factory.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App};

use crate::middleware::create_cors;
use crate::routes;
use crate::state::AppState;

/// Builds the actix application with all routes and middleware wired.
///
/// The token service is registered as its own app data so the JWT
/// middleware can verify tokens without going through `AppState`.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service = state.token_service.clone();

    App::new()
        .app_data(state)
        .app_data(web::Data::new(token_service))
        .wrap(Logger::default())
        .wrap(create_cors())
        .route("/health", web::get().to(routes::health_check))
        .configure(routes::configure)
        .default_service(web::route().to(routes::not_found))
}
