//! Infrastructure layer: MySQL persistence, SMTP delivery and the
//! Google token verifier.

pub mod database;
pub mod delivery;
pub mod google;

use thiserror::Error;

/// Errors raised while setting up infrastructure components.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Email transport error: {0}")]
    Email(String),
}

pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlBookingRepository, MySqlFavoriteRepository, MySqlNotificationRepository,
    MySqlOtpRepository, MySqlRoomRepository, MySqlUserRepository,
};
pub use delivery::{ConfiguredDeliveryGateway, EmailDeliveryGateway, LogDeliveryGateway};
pub use google::GoogleApiVerifier;
