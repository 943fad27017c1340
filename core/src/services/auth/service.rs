//! Account service implementation.

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Gender, User};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};
use crate::services::otp::{Clock, DeliveryGateway, OtpService};
use crate::services::token::TokenService;

use super::response::AuthResponse;
use super::traits::GoogleTokenVerifier;

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

/// Profile update input. `phone_number` different from the stored one
/// triggers the OTP round-trip; `otp_code` carries the answer on the
/// second call.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub otp_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

/// Result of a profile update attempt.
///
/// A phone-number change is a two-step exchange, so "send the code
/// first" is a normal outcome rather than an error.
#[derive(Debug, Clone)]
pub enum ProfileUpdateOutcome {
    Updated(User),
    OtpRequired,
}

/// Registration, login and profile flows.
///
/// All operations take the acting user explicitly; there is no ambient
/// "current user" state in this layer.
pub struct AuthService<U, O, D, C, G>
where
    U: UserRepository,
    O: OtpRepository,
    D: DeliveryGateway,
    C: Clock,
    G: GoogleTokenVerifier,
{
    user_repository: Arc<U>,
    otp_repository: Arc<O>,
    otp_service: Arc<OtpService<O, U, D, C>>,
    token_service: Arc<TokenService>,
    google_verifier: Arc<G>,
}

impl<U, O, D, C, G> AuthService<U, O, D, C, G>
where
    U: UserRepository,
    O: OtpRepository,
    D: DeliveryGateway,
    C: Clock,
    G: GoogleTokenVerifier,
{
    pub fn new(
        user_repository: Arc<U>,
        otp_repository: Arc<O>,
        otp_service: Arc<OtpService<O, U, D, C>>,
        token_service: Arc<TokenService>,
        google_verifier: Arc<G>,
    ) -> Self {
        Self {
            user_repository,
            otp_repository,
            otp_service,
            token_service,
            google_verifier,
        }
    }

    /// Registers a new account and issues the activation OTP.
    ///
    /// The account starts disabled with a throwaway password hash; it
    /// becomes usable only after the OTP is verified and a real
    /// password is set via [`set_password`].
    ///
    /// [`set_password`]: AuthService::set_password
    pub async fn register(&self, input: NewUser) -> DomainResult<User> {
        if self.user_repository.exists_by_email(&input.email).await? {
            return Err(AuthError::EmailAlreadyExists.into());
        }
        if self
            .user_repository
            .exists_by_phone(&input.phone_number)
            .await?
        {
            return Err(AuthError::PhoneAlreadyExists.into());
        }

        // Placeholder hash; replaced when the user sets their password.
        let temp_hash = hash_password(&Uuid::new_v4().to_string())?;

        let mut user = User::new(input.full_name, input.email, input.phone_number, temp_hash);
        user.date_of_birth = input.date_of_birth;
        user.gender = input.gender;

        let user = self.user_repository.create(user).await?;
        self.otp_service.issue(&user).await?;

        tracing::info!(
            user_id = %user.id,
            event = "user_registered",
            "User registered, awaiting OTP verification"
        );
        Ok(user)
    }

    /// Completes registration: stores the real password and enables the
    /// account. Requires a previously verified OTP, which is consumed
    /// here.
    pub async fn set_password(&self, phone: &str, password: &str) -> DomainResult<()> {
        let mut user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let record = self
            .otp_repository
            .find_by_user(user.id)
            .await?
            .ok_or(AuthError::OtpNotVerified)?;
        if !record.verified {
            return Err(AuthError::OtpNotVerified.into());
        }

        user.set_password_hash(hash_password(password)?);
        user.enable();
        self.user_repository.update(user.clone()).await?;
        self.otp_repository.delete_by_user(user.id).await?;

        tracing::info!(
            user_id = %user.id,
            event = "registration_completed",
            "Password set, account enabled"
        );
        Ok(())
    }

    /// Password login by email.
    ///
    /// Unknown email and wrong password collapse into the same error so
    /// the endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;
        if !valid {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                reason = "bad_password",
                "Login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.enabled {
            return Err(AuthError::AccountNotActivated.into());
        }

        let access_token = self.token_service.generate_token(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, event = "login", "User logged in");
        Ok(AuthResponse { user, access_token })
    }

    /// Google sign-in: verifies the access token with Google, then finds
    /// or creates the matching account. Google accounts are enabled
    /// immediately since Google already verified the email.
    pub async fn login_with_google(&self, access_token: &str) -> DomainResult<AuthResponse> {
        let profile = self.google_verifier.fetch_profile(access_token).await?;
        let full_name = profile
            .full_name
            .unwrap_or_else(|| "Google User".to_string());

        let user = match self.user_repository.find_by_email(&profile.email).await? {
            Some(mut user) => {
                let mut changed = false;
                if user.full_name != full_name {
                    user.full_name = full_name;
                    changed = true;
                }
                if !user.enabled {
                    user.enable();
                    changed = true;
                }
                if changed {
                    self.user_repository.update(user.clone()).await?;
                }
                user
            }
            None => {
                // Password login is not expected for this account, so the
                // hash is a random throwaway.
                let throwaway = hash_password(&Uuid::new_v4().to_string())?;
                let mut user = User::new(full_name, profile.email, String::new(), throwaway);
                user.enable();
                let user = self.user_repository.create(user).await?;
                tracing::info!(
                    user_id = %user.id,
                    event = "google_user_created",
                    "Account created via Google sign-in"
                );
                user
            }
        };

        let token = self.token_service.generate_token(user.id, &user.email)?;
        Ok(AuthResponse {
            user,
            access_token: token,
        })
    }

    /// Loads the acting user's own profile.
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Changes the password of an authenticated user after checking the
    /// old one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self.current_user(user_id).await?;

        let old_matches = bcrypt::verify(old_password, &user.password_hash)
            .map_err(|_| AuthError::WrongOldPassword)?;
        if !old_matches {
            return Err(AuthError::WrongOldPassword.into());
        }

        user.set_password_hash(hash_password(new_password)?);
        self.user_repository.update(user).await?;

        tracing::info!(user_id = %user_id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Starts the password reset flow by sending an OTP to the account's
    /// registered contact.
    pub async fn forgot_password(&self, phone: &str) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.otp_service.issue(&user).await?;
        tracing::info!(
            user_id = %user.id,
            event = "password_reset_requested",
            "OTP sent for password reset"
        );
        Ok(())
    }

    /// Finishes the password reset. The OTP must already be verified and
    /// still inside its expiry window; it is consumed on success. Also
    /// enables the account, so a reset can rescue a half-registered
    /// user.
    pub async fn reset_password(
        &self,
        phone: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.otp_service.validate_for_reset(code, phone).await? {
            return Err(AuthError::InvalidOtp.into());
        }

        user.set_password_hash(hash_password(new_password)?);
        user.enable();
        self.user_repository.update(user.clone()).await?;
        self.otp_service.delete(user.id).await?;

        tracing::info!(user_id = %user.id, event = "password_reset", "Password reset completed");
        Ok(())
    }

    /// Updates profile fields. Changing the phone number requires an
    /// OTP sent to the new number: the first call (without a code)
    /// dispatches it and returns [`ProfileUpdateOutcome::OtpRequired`];
    /// the second call carries the code and applies the change.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        input: ProfileUpdate,
    ) -> DomainResult<ProfileUpdateOutcome> {
        let mut user = self.current_user(user_id).await?;

        if user.email != input.email && self.user_repository.exists_by_email(&input.email).await? {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let phone_change = input
            .phone_number
            .as_deref()
            .filter(|p| !p.is_empty() && *p != user.phone_number);

        if let Some(new_phone) = phone_change {
            if self.user_repository.exists_by_phone(new_phone).await? {
                return Err(AuthError::PhoneAlreadyExists.into());
            }

            match input.otp_code.as_deref().filter(|c| !c.is_empty()) {
                None => {
                    self.otp_service
                        .issue_for_contact_change(&user, new_phone)
                        .await?;
                    return Ok(ProfileUpdateOutcome::OtpRequired);
                }
                Some(code) => {
                    if !self.otp_service.verify_for_user(code, &user).await? {
                        return Err(AuthError::InvalidOtp.into());
                    }
                    user.set_phone_number(new_phone.to_string());
                }
            }
        }

        user.full_name = input.full_name;
        user.email = input.email;
        if input.date_of_birth.is_some() {
            user.date_of_birth = input.date_of_birth;
        }
        if input.gender.is_some() {
            user.gender = input.gender;
        }

        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, event = "profile_updated", "Profile updated");
        Ok(ProfileUpdateOutcome::Updated(user))
    }
}

fn hash_password(raw: &str) -> DomainResult<String> {
    bcrypt::hash(raw, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!(error = %e, event = "password_hash_failed", "bcrypt hash failed");
        AuthError::PasswordHashFailed.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sb_shared::config::JwtConfig;

    use crate::errors::DomainError;
    use crate::repositories::{MockOtpRepository, MockUserRepository};
    use crate::services::auth::GoogleProfile;
    use crate::services::otp::{DeliveryError, SystemClock};

    /// Delivery gateway that quietly accepts everything.
    #[derive(Default)]
    struct NullDelivery;

    #[async_trait]
    impl DeliveryGateway for NullDelivery {
        async fn send_email(&self, _address: &str, _code: &str) -> Result<(), DeliveryError> {
            Ok(())
        }

        async fn send_fallback(&self, _contact: &str, _code: &str) {}
    }

    struct StubGoogleVerifier {
        profile: Option<GoogleProfile>,
    }

    #[async_trait]
    impl GoogleTokenVerifier for StubGoogleVerifier {
        async fn fetch_profile(&self, _access_token: &str) -> DomainResult<GoogleProfile> {
            self.profile
                .clone()
                .ok_or_else(|| AuthError::GoogleTokenInvalid.into())
        }
    }

    type TestAuthService =
        AuthService<MockUserRepository, MockOtpRepository, NullDelivery, SystemClock, StubGoogleVerifier>;

    struct Fixture {
        service: TestAuthService,
        user_repo: Arc<MockUserRepository>,
        otp_repo: Arc<MockOtpRepository>,
        otp_service:
            Arc<OtpService<MockOtpRepository, MockUserRepository, NullDelivery, SystemClock>>,
    }

    fn fixture_with_google(profile: Option<GoogleProfile>) -> Fixture {
        let user_repo = Arc::new(MockUserRepository::new());
        let otp_repo = Arc::new(MockOtpRepository::new());
        let otp_service = Arc::new(OtpService::new(
            otp_repo.clone(),
            user_repo.clone(),
            Arc::new(NullDelivery),
            Arc::new(SystemClock),
        ));
        let token_service = Arc::new(TokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_token_minutes: 60,
            issuer: "staybooking".to_string(),
        }));
        let service = AuthService::new(
            user_repo.clone(),
            otp_repo.clone(),
            otp_service.clone(),
            token_service,
            Arc::new(StubGoogleVerifier { profile }),
        );
        Fixture {
            service,
            user_repo,
            otp_repo,
            otp_service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_google(None)
    }

    fn new_user() -> NewUser {
        NewUser {
            full_name: "Minh Tran".to_string(),
            email: "minh@example.com".to_string(),
            phone_number: "0912345678".to_string(),
            date_of_birth: None,
            gender: None,
        }
    }

    /// Verify the pending OTP directly through the OTP service, reading
    /// the generated code out of the repository.
    async fn verify_pending_otp(fx: &Fixture, user: &User) {
        use crate::repositories::OtpRepository;
        let record = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
        assert!(fx
            .otp_service
            .verify(&record.code, &user.phone_number)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_creates_disabled_user_with_pending_otp() {
        use crate::repositories::OtpRepository;
        let fx = fixture();

        let user = fx.service.register(new_user()).await.unwrap();

        assert!(!user.enabled);
        assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let fx = fixture();
        fx.service.register(new_user()).await.unwrap();

        let mut dup = new_user();
        dup.phone_number = "0999888777".to_string();
        let err = fx.service.register(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_set_password_requires_verified_otp() {
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();

        let err = fx
            .service
            .set_password(&user.phone_number, "s3cret-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::OtpNotVerified)));
    }

    #[tokio::test]
    async fn test_full_activation_flow() {
        use crate::repositories::OtpRepository;
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();

        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "s3cret-pass")
            .await
            .unwrap();

        // OTP consumed on completion.
        assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());

        let response = fx.service.login(&user.email, "s3cret-pass").await.unwrap();
        assert!(response.user.enabled);
        assert!(!response.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();
        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "s3cret-pass")
            .await
            .unwrap();

        let err = fx.service.login(&user.email, "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error_as_bad_password() {
        let fx = fixture();
        let err = fx.service.login("ghost@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_disabled_account() {
        use crate::repositories::UserRepository;
        let fx = fixture();

        // A user with a real password but a never-activated account.
        let user = User::new(
            "Lan Pham".to_string(),
            "lan@example.com".to_string(),
            "0987654321".to_string(),
            bcrypt::hash("s3cret-pass", 4).unwrap(),
        );
        fx.user_repo.create(user.clone()).await.unwrap();

        let err = fx
            .service
            .login(&user.email, "s3cret-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::AccountNotActivated)));
    }

    #[tokio::test]
    async fn test_google_sign_in_creates_enabled_account() {
        let fx = fixture_with_google(Some(GoogleProfile {
            email: "g@example.com".to_string(),
            full_name: Some("G User".to_string()),
        }));

        let response = fx.service.login_with_google("tok").await.unwrap();
        assert!(response.user.enabled);
        assert_eq!(response.user.email, "g@example.com");
        assert_eq!(response.user.full_name, "G User");
    }

    #[tokio::test]
    async fn test_google_sign_in_invalid_token() {
        let fx = fixture();
        let err = fx.service.login_with_google("bad").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::GoogleTokenInvalid)));
    }

    #[tokio::test]
    async fn test_change_password_checks_old_password() {
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();
        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "old-pass")
            .await
            .unwrap();

        let err = fx
            .service
            .change_password(user.id, "not-the-old-one", "new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::WrongOldPassword)));

        fx.service
            .change_password(user.id, "old-pass", "new-pass")
            .await
            .unwrap();
        assert!(fx.service.login(&user.email, "new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        use crate::repositories::OtpRepository;
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();
        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "old-pass")
            .await
            .unwrap();

        fx.service.forgot_password(&user.phone_number).await.unwrap();
        let record = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
        let code = record.code.clone();

        // Reset requires the verify step first.
        let err = fx
            .service
            .reset_password(&user.phone_number, &code, "new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidOtp)));

        assert!(fx.otp_service.verify(&code, &user.phone_number).await.unwrap());
        fx.service
            .reset_password(&user.phone_number, &code, "new-pass")
            .await
            .unwrap();

        assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());
        assert!(fx.service.login(&user.email, "new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_phone_change_round_trip() {
        use crate::repositories::OtpRepository;
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();
        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "s3cret-pass")
            .await
            .unwrap();

        let update = ProfileUpdate {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone_number: Some("0911222333".to_string()),
            otp_code: None,
            date_of_birth: None,
            gender: None,
        };

        // First call: OTP dispatched to the new number, nothing applied.
        let outcome = fx.service.update_profile(user.id, update.clone()).await.unwrap();
        assert!(matches!(outcome, ProfileUpdateOutcome::OtpRequired));

        let code = fx
            .otp_repo
            .find_by_user(user.id)
            .await
            .unwrap()
            .unwrap()
            .code;

        let outcome = fx
            .service
            .update_profile(
                user.id,
                ProfileUpdate {
                    otp_code: Some(code),
                    ..update
                },
            )
            .await
            .unwrap();

        match outcome {
            ProfileUpdateOutcome::Updated(updated) => {
                assert_eq!(updated.phone_number, "0911222333");
            }
            ProfileUpdateOutcome::OtpRequired => panic!("expected the update to apply"),
        }
    }

    #[tokio::test]
    async fn test_update_profile_wrong_otp() {
        let fx = fixture();
        let user = fx.service.register(new_user()).await.unwrap();
        verify_pending_otp(&fx, &user).await;
        fx.service
            .set_password(&user.phone_number, "s3cret-pass")
            .await
            .unwrap();

        let update = ProfileUpdate {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone_number: Some("0911222333".to_string()),
            otp_code: None,
            date_of_birth: None,
            gender: None,
        };
        fx.service.update_profile(user.id, update.clone()).await.unwrap();

        // Pin the pending code so the wrong guess is deterministic.
        use crate::repositories::OtpRepository;
        let mut record = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
        record.code = "1234".to_string();
        fx.otp_repo.save(record).await.unwrap();

        let err = fx
            .service
            .update_profile(
                user.id,
                ProfileUpdate {
                    otp_code: Some("0000".to_string()),
                    ..update
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidOtp)));
    }
}
