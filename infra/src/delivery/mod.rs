//! OTP delivery channels.
//!
//! Email over SMTP is the preferred channel; the log gateway is the
//! fallback (and the whole story in development environments without an
//! SMS provider).

mod email;
mod log;

pub use email::EmailDeliveryGateway;
pub use log::LogDeliveryGateway;

use async_trait::async_trait;

use sb_core::services::otp::{DeliveryError, DeliveryGateway};
use sb_shared::config::EmailConfig;

use crate::InfrastructureError;

/// Delivery gateway selected from configuration: SMTP when email is
/// enabled and credentials are present, log-only otherwise.
pub enum ConfiguredDeliveryGateway {
    Smtp(EmailDeliveryGateway),
    Log(LogDeliveryGateway),
}

impl ConfiguredDeliveryGateway {
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.enabled {
            Ok(Self::Smtp(EmailDeliveryGateway::new(config)?))
        } else {
            tracing::warn!("Email delivery disabled; OTP codes will be logged");
            Ok(Self::Log(LogDeliveryGateway::new()))
        }
    }
}

#[async_trait]
impl DeliveryGateway for ConfiguredDeliveryGateway {
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DeliveryError> {
        match self {
            Self::Smtp(gateway) => gateway.send_email(address, code).await,
            Self::Log(gateway) => gateway.send_email(address, code).await,
        }
    }

    async fn send_fallback(&self, contact: &str, code: &str) {
        match self {
            Self::Smtp(gateway) => gateway.send_fallback(contact, code).await,
            Self::Log(gateway) => gateway.send_fallback(contact, code).await,
        }
    }
}
