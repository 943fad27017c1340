//! End-to-end OTP lifecycle exercised through the public crate API:
//! registration, code delivery, verification, activation and password
//! reset, with time controlled by a settable clock.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use sb_core::repositories::{MockOtpRepository, MockUserRepository, OtpRepository};
use sb_core::services::otp::FixedClock;
use sb_core::services::{
    AuthService, DeliveryError, DeliveryGateway, NewUser, OtpService, TokenService,
};
use sb_shared::config::JwtConfig;

/// Captures the latest delivered code, whatever the channel.
#[derive(Default)]
struct CapturingGateway {
    last_code: Mutex<Option<String>>,
}

impl CapturingGateway {
    fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryGateway for CapturingGateway {
    async fn send_email(&self, _address: &str, code: &str) -> Result<(), DeliveryError> {
        *self.last_code.lock().unwrap() = Some(code.to_string());
        Ok(())
    }

    async fn send_fallback(&self, _contact: &str, code: &str) {
        *self.last_code.lock().unwrap() = Some(code.to_string());
    }
}

struct Stack {
    auth: AuthService<
        MockUserRepository,
        MockOtpRepository,
        CapturingGateway,
        FixedClock,
        NoGoogle,
    >,
    otp: Arc<OtpService<MockOtpRepository, MockUserRepository, CapturingGateway, FixedClock>>,
    otp_repo: Arc<MockOtpRepository>,
    gateway: Arc<CapturingGateway>,
    clock: Arc<FixedClock>,
}

struct NoGoogle;

#[async_trait]
impl sb_core::services::GoogleTokenVerifier for NoGoogle {
    async fn fetch_profile(
        &self,
        _access_token: &str,
    ) -> sb_core::errors::DomainResult<sb_core::services::GoogleProfile> {
        Err(sb_core::errors::AuthError::GoogleTokenInvalid.into())
    }
}

fn stack() -> Stack {
    let user_repo = Arc::new(MockUserRepository::new());
    let otp_repo = Arc::new(MockOtpRepository::new());
    let gateway = Arc::new(CapturingGateway::default());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
    ));
    let otp = Arc::new(OtpService::new(
        otp_repo.clone(),
        user_repo.clone(),
        gateway.clone(),
        clock.clone(),
    ));
    let auth = AuthService::new(
        user_repo,
        otp_repo.clone(),
        otp.clone(),
        Arc::new(TokenService::new(JwtConfig::default())),
        Arc::new(NoGoogle),
    );
    Stack {
        auth,
        otp,
        otp_repo,
        gateway,
        clock,
    }
}

fn registration() -> NewUser {
    NewUser {
        full_name: "Minh Tran".to_string(),
        email: "minh@example.com".to_string(),
        phone_number: "0912345678".to_string(),
        date_of_birth: None,
        gender: None,
    }
}

#[tokio::test]
async fn registration_activation_and_login() {
    let s = stack();

    let user = s.auth.register(registration()).await.unwrap();
    let code = s.gateway.last_code().unwrap();

    s.clock.advance(Duration::minutes(1));
    assert!(s.otp.verify(&code, &user.phone_number).await.unwrap());

    s.auth
        .set_password(&user.phone_number, "s3cret-pass")
        .await
        .unwrap();

    let session = s.auth.login(&user.email, "s3cret-pass").await.unwrap();
    assert!(session.user.enabled);
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn code_expires_after_five_minutes() {
    let s = stack();

    let user = s.auth.register(registration()).await.unwrap();
    let code = s.gateway.last_code().unwrap();

    s.clock.advance(Duration::minutes(6));
    assert!(!s.otp.verify(&code, &user.phone_number).await.unwrap());

    // The lapsed record is purged; a resend starts a fresh window.
    assert!(s.otp_repo.find_by_user(user.id).await.unwrap().is_none());

    s.otp.resend(&user.phone_number).await.unwrap();
    let new_code = s.gateway.last_code().unwrap();
    s.clock.advance(Duration::minutes(1));
    assert!(s.otp.verify(&new_code, &user.phone_number).await.unwrap());
}

#[tokio::test]
async fn password_reset_window_closes() {
    let s = stack();

    let user = s.auth.register(registration()).await.unwrap();
    let code = s.gateway.last_code().unwrap();
    s.clock.advance(Duration::minutes(1));
    assert!(s.otp.verify(&code, &user.phone_number).await.unwrap());
    s.auth
        .set_password(&user.phone_number, "first-pass")
        .await
        .unwrap();

    // Forgot-password issues a new code bound to the same record slot.
    s.auth.forgot_password(&user.phone_number).await.unwrap();
    let reset_code = s.gateway.last_code().unwrap();

    s.clock.advance(Duration::minutes(1));
    assert!(s.otp.verify(&reset_code, &user.phone_number).await.unwrap());

    // Within the window the reset goes through.
    s.clock.advance(Duration::minutes(2));
    s.auth
        .reset_password(&user.phone_number, &reset_code, "second-pass")
        .await
        .unwrap();
    assert!(s.auth.login(&user.email, "second-pass").await.is_ok());

    // A second attempt with the consumed code fails.
    assert!(s
        .auth
        .reset_password(&user.phone_number, &reset_code, "third-pass")
        .await
        .is_err());
}
