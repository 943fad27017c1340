//! Verifies Google access tokens against the userinfo endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use sb_core::errors::{AuthError, DomainResult};
use sb_core::services::auth::{GoogleProfile, GoogleTokenVerifier};

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: Option<String>,
    name: Option<String>,
}

/// Calls Google's OAuth2 userinfo API to resolve an access token.
pub struct GoogleApiVerifier {
    client: reqwest::Client,
}

impl GoogleApiVerifier {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for GoogleApiVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleApiVerifier {
    async fn fetch_profile(&self, access_token: &str) -> DomainResult<GoogleProfile> {
        let response = self
            .client
            .get(USERINFO_URL)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, event = "google_userinfo_failed", "Google API unreachable");
                AuthError::GoogleTokenInvalid
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                event = "google_token_rejected",
                "Google rejected the access token"
            );
            return Err(AuthError::GoogleTokenInvalid.into());
        }

        let info: UserInfoResponse = response
            .json()
            .await
            .map_err(|_| AuthError::GoogleTokenInvalid)?;

        let email = info.email.ok_or(AuthError::GoogleTokenInvalid)?;
        Ok(GoogleProfile {
            email,
            full_name: info.name,
        })
    }
}
