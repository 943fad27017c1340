//! SMTP delivery of OTP codes.

use async_trait::async_trait;
use lettre::{
    message::Mailbox,
    transport::smtp::{authentication::Credentials, PoolConfig},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;

use sb_core::services::otp::{DeliveryError, DeliveryGateway};
use sb_shared::config::EmailConfig;

use crate::InfrastructureError;

/// Sends OTP codes by email over a pooled SMTP connection; falls back
/// to logging the code when email fails upstream (the fallback side is
/// delegated, see [`LogDeliveryGateway`]).
///
/// [`LogDeliveryGateway`]: crate::delivery::LogDeliveryGateway
pub struct EmailDeliveryGateway {
    sender: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDeliveryGateway {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let sender: Mailbox = config
            .sender
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        tracing::info!(host = %config.smtp_host, "Connecting to SMTP server");
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Email(e.to_string()))?
            .credentials(credentials)
            .pool_config(
                PoolConfig::new()
                    .min_idle(1)
                    .max_size(10)
                    .idle_timeout(Duration::from_secs(300)),
            )
            .build();

        Ok(Self { sender, mailer })
    }
}

#[async_trait]
impl DeliveryGateway for EmailDeliveryGateway {
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DeliveryError> {
        let to: Mailbox = address
            .parse()
            .map_err(|e| DeliveryError::Email(format!("Invalid recipient address: {}", e)))?;

        let email = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject("Your verification code")
            .body(format!(
                "Your verification code is {}. It expires in 5 minutes.",
                code
            ))
            .map_err(|e| DeliveryError::Email(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| DeliveryError::Email(e.to_string()))?;

        tracing::info!(event = "otp_email_sent", "OTP email dispatched");
        Ok(())
    }

    async fn send_fallback(&self, contact: &str, code: &str) {
        // No SMS provider is wired up; surface the code in the logs the
        // way a development SMS console would.
        tracing::info!(
            contact = %contact,
            code = %code,
            event = "otp_fallback_dispatch",
            "OTP dispatched over fallback channel"
        );
    }
}
