//! Access token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Email of the authenticated user
    pub email: String,
    /// Expiration time (unix timestamp)
    pub exp: i64,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Builds claims for a freshly issued access token.
    pub fn new(user_id: Uuid, email: String, issuer: String, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        Self::at(user_id, email, issuer, expiry_minutes, now)
    }

    pub(crate) fn at(
        user_id: Uuid,
        email: String,
        issuer: String,
        expiry_minutes: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            email,
            exp: (now + Duration::minutes(expiry_minutes)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: issuer,
        }
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry_window() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "a@b.com".to_string(), "stay-booking".to_string(), 60);

        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.user_id(), Some(user_id));
    }
}
