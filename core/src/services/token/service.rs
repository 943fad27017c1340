//! JWT encoding and decoding.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use sb_shared::config::JwtConfig;

use crate::errors::{DomainResult, TokenError};

use super::claims::Claims;

/// Issues and verifies HS256 access tokens.
///
/// Tokens are stateless; expiry is enforced purely through the `exp`
/// claim, so there is no revocation list to consult on verification.
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates an access token for the given user.
    pub fn generate_token(&self, user_id: Uuid, email: &str) -> DomainResult<String> {
        let claims = Claims::new(
            user_id,
            email.to_string(),
            self.config.issuer.clone(),
            self.config.access_token_minutes,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(
                error = %e,
                event = "token_generation_failed",
                "Failed to encode access token"
            );
            TokenError::TokenGenerationFailed.into()
        })
    }

    /// Verifies a token's signature, issuer and expiry, returning its
    /// claims.
    pub fn verify_token(&self, token: &str) -> DomainResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| Self::map_decode_error(&e))?;
        Ok(data.claims)
    }

    fn map_decode_error(err: &jsonwebtoken::errors::Error) -> crate::errors::DomainError {
        use jsonwebtoken::errors::ErrorKind;

        let token_error = match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
                TokenError::InvalidTokenFormat
            }
            _ => TokenError::InvalidClaims,
        };
        token_error.into()
    }
}
