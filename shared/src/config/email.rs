//! SMTP email delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP relay configuration for OTP delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender address used in the From header
    pub sender: String,

    /// When false, the API wires the log-only delivery gateway instead of
    /// SMTP. Useful for local development.
    pub enabled: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            username: String::new(),
            password: String::new(),
            sender: String::from("no-reply@staybooking.local"),
            enabled: false,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = EmailConfig::default();
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.password),
            sender: std::env::var("SMTP_SENDER").unwrap_or(defaults.sender),
            enabled: std::env::var("SMTP_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
