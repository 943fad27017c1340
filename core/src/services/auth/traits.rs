//! Seam for verifying third-party sign-in tokens.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Profile data returned by Google for a valid access token.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub full_name: Option<String>,
}

/// Resolves a Google OAuth access token to the owner's profile.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    /// Returns the profile for `access_token`, or
    /// [`AuthError::GoogleTokenInvalid`] when Google rejects it.
    ///
    /// [`AuthError::GoogleTokenInvalid`]: crate::errors::AuthError::GoogleTokenInvalid
    async fn fetch_profile(&self, access_token: &str) -> DomainResult<GoogleProfile>;
}
