//! StayBooking API server entry point.

use actix_web::{web, HttpServer};

use sb_api::app::create_app;
use sb_api::state::AppState;
use sb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();

    log::info!("Connecting to database");
    let state = AppState::initialize(&config).await?;
    let state = web::Data::new(state);

    log::info!("Starting server on {}", bind_address);
    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
