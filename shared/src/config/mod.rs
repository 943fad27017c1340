//! Configuration types for the StayBooking server
//!
//! All configuration is sourced from environment variables (loaded from a
//! `.env` file in development). Each section provides a `from_env`
//! constructor with sensible defaults for local development.

mod auth;
mod database;
mod email;
mod server;

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use server::ServerConfig;

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}
