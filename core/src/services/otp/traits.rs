//! Delivery channel seam for dispatching OTP codes.

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure of the preferred (email) channel.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("email delivery failed: {0}")]
    Email(String),
}

/// Sends an OTP code to a user's contact channel.
///
/// Email is the preferred channel and may fail; the fallback channel
/// must never fail observably (at worst it logs the code for operator
/// pickup, matching development environments without an SMS provider).
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Deliver the code to an email address.
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DeliveryError>;

    /// Deliver the code over the fallback channel (SMS or log).
    async fn send_fallback(&self, contact: &str, code: &str);
}
