//! Log-only delivery for environments without SMTP credentials.

use async_trait::async_trait;

use sb_core::services::otp::{DeliveryError, DeliveryGateway};

/// Prints every code to the application log instead of sending it.
/// Used when email delivery is disabled in configuration.
#[derive(Default)]
pub struct LogDeliveryGateway;

impl LogDeliveryGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryGateway for LogDeliveryGateway {
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %address,
            code = %code,
            event = "otp_email_logged",
            "Email delivery disabled; OTP written to log"
        );
        Ok(())
    }

    async fn send_fallback(&self, contact: &str, code: &str) {
        tracing::info!(
            contact = %contact,
            code = %code,
            event = "otp_fallback_dispatch",
            "OTP dispatched over fallback channel"
        );
    }
}
