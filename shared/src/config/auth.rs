//! JWT authentication configuration

use serde::{Deserialize, Serialize};

/// JWT signing and expiry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify access tokens
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_minutes: i64,

    /// Token issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("dev-secret-change-me"),
            access_token_minutes: 60,
            issuer: String::from("staybooking"),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables (`JWT_SECRET`, `JWT_ACCESS_MINUTES`)
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_minutes = std::env::var("JWT_ACCESS_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_minutes);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);

        Self {
            secret,
            access_token_minutes,
            issuer,
        }
    }
}
