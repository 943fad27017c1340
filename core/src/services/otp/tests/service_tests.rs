//! OTP lifecycle tests driven through a settable clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::otp::{OtpRecord, OTP_CODE_LENGTH};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockOtpRepository, MockUserRepository, OtpRepository, UserRepository};
use crate::services::otp::{Clock, FixedClock, OtpService};

use super::mocks::MockDeliveryGateway;

type TestService =
    OtpService<MockOtpRepository, MockUserRepository, MockDeliveryGateway, FixedClock>;

struct Fixture {
    service: TestService,
    otp_repo: Arc<MockOtpRepository>,
    user_repo: Arc<MockUserRepository>,
    delivery: Arc<MockDeliveryGateway>,
    clock: Arc<FixedClock>,
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
}

fn fixture() -> Fixture {
    let otp_repo = Arc::new(MockOtpRepository::new());
    let user_repo = Arc::new(MockUserRepository::new());
    let delivery = Arc::new(MockDeliveryGateway::new());
    let clock = Arc::new(FixedClock::new(t0()));
    let service = OtpService::new(
        otp_repo.clone(),
        user_repo.clone(),
        delivery.clone(),
        clock.clone(),
    );
    Fixture {
        service,
        otp_repo,
        user_repo,
        delivery,
        clock,
    }
}

async fn seed_user(fx: &Fixture) -> User {
    let user = User::new(
        "Minh Tran".to_string(),
        "minh@example.com".to_string(),
        "0912345678".to_string(),
        "$2b$12$hash".to_string(),
    );
    fx.user_repo.create(user.clone()).await.unwrap();
    user
}

async fn seed_user_without_email(fx: &Fixture) -> User {
    let user = User::new(
        "Lan Pham".to_string(),
        String::new(),
        "0987654321".to_string(),
        "$2b$12$hash".to_string(),
    );
    fx.user_repo.create(user.clone()).await.unwrap();
    user
}

/// Plant a record with a known code so verification paths can be
/// exercised deterministically.
async fn seed_code(fx: &Fixture, user: &User, code: &str) -> OtpRecord {
    let record = OtpRecord::new(user.id, code.to_string(), fx.clock.now());
    fx.otp_repo.save(record.clone()).await.unwrap();
    record
}

#[test]
fn test_generate_code_is_fixed_length_numeric() {
    for _ in 0..200 {
        let code = TestService::generate_code();
        assert_eq!(code.len(), OTP_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[tokio::test]
async fn test_issue_creates_record_and_sends_email() {
    let fx = fixture();
    let user = seed_user(&fx).await;

    let record = fx.service.issue(&user).await.unwrap();

    assert_eq!(record.user_id, user.id);
    assert_eq!(record.code.len(), OTP_CODE_LENGTH);
    assert!(!record.verified);
    assert_eq!(record.expires_at, t0() + Duration::minutes(5));

    assert_eq!(fx.delivery.email_count(), 1);
    assert_eq!(fx.delivery.fallback_count(), 0);
    assert_eq!(fx.delivery.last_code().unwrap(), record.code);

    let stored = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.code, record.code);
}

#[tokio::test]
async fn test_issue_without_email_uses_fallback() {
    let fx = fixture();
    let user = seed_user_without_email(&fx).await;

    let record = fx.service.issue(&user).await.unwrap();

    assert_eq!(fx.delivery.email_count(), 0);
    assert_eq!(fx.delivery.fallback_count(), 1);
    let fallbacks = fx.delivery.fallbacks.lock().unwrap();
    assert_eq!(fallbacks[0], (user.phone_number.clone(), record.code));
}

#[tokio::test]
async fn test_issue_falls_back_when_email_fails() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    fx.delivery.fail_email_sends();

    let record = fx.service.issue(&user).await.unwrap();

    // Delivery failure never fails the issuance itself.
    assert_eq!(fx.delivery.email_count(), 0);
    assert_eq!(fx.delivery.fallback_count(), 1);
    assert_eq!(fx.delivery.last_code().unwrap(), record.code);
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_second_issue_supersedes_first_code() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.clock.advance(Duration::minutes(2));
    let reissued = fx.service.issue(&user).await.unwrap();

    // One record per user: the reissue overwrote in place.
    let stored = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.code, reissued.code);
    assert!(!stored.verified);
    assert_eq!(stored.expires_at, t0() + Duration::minutes(7));
}

#[tokio::test]
async fn test_issue_for_contact_change_targets_new_phone_only() {
    let fx = fixture();
    let user = seed_user(&fx).await;

    let record = fx
        .service
        .issue_for_contact_change(&user, "0911222333")
        .await
        .unwrap();

    assert_eq!(fx.delivery.email_count(), 0);
    assert_eq!(fx.delivery.fallback_count(), 1);
    let fallbacks = fx.delivery.fallbacks.lock().unwrap();
    assert_eq!(fallbacks[0], ("0911222333".to_string(), record.code));
}

#[tokio::test]
async fn test_verify_succeeds_exactly_once() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.clock.advance(Duration::minutes(1));
    assert!(fx.service.verify("1234", &user.phone_number).await.unwrap());

    // Replay of the same code is rejected.
    fx.clock.advance(Duration::minutes(1));
    assert!(!fx.service.verify("1234", &user.phone_number).await.unwrap());
}

#[tokio::test]
async fn test_verify_wrong_code_leaves_record_untouched() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    assert!(!fx.service.verify("9999", &user.phone_number).await.unwrap());

    let stored = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
    assert!(!stored.verified);
    assert_eq!(stored.code, "1234");
}

#[tokio::test]
async fn test_verify_unknown_phone_is_false_not_error() {
    let fx = fixture();
    assert!(!fx.service.verify("1234", "0900000000").await.unwrap());
}

#[tokio::test]
async fn test_verify_expired_code_deletes_record() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "5555").await;

    fx.clock.advance(Duration::minutes(6));
    assert!(!fx.service.verify("5555", &user.phone_number).await.unwrap());

    // Expired attempt purges the record entirely.
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_verify_at_exact_expiry_instant_fails() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    // Expiry boundary is inclusive.
    fx.clock.advance(Duration::minutes(5));
    assert!(!fx.service.verify("1234", &user.phone_number).await.unwrap());
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_validate_for_reset_requires_prior_verification() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    assert!(!fx
        .service
        .validate_for_reset("1234", &user.phone_number)
        .await
        .unwrap());

    fx.clock.advance(Duration::minutes(1));
    assert!(fx.service.verify("1234", &user.phone_number).await.unwrap());

    fx.clock.advance(Duration::minutes(1));
    assert!(fx
        .service
        .validate_for_reset("1234", &user.phone_number)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_validate_for_reset_is_read_only_on_expiry() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.clock.advance(Duration::minutes(1));
    assert!(fx.service.verify("1234", &user.phone_number).await.unwrap());

    fx.clock.advance(Duration::minutes(5));
    assert!(!fx
        .service
        .validate_for_reset("1234", &user.phone_number)
        .await
        .unwrap());

    // Unlike verify, validation never deletes.
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_resend_unknown_phone_is_an_error() {
    let fx = fixture();
    let err = fx.service.resend("0900000000").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_resend_resets_verified_state() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.clock.advance(Duration::minutes(1));
    assert!(fx.service.verify("1234", &user.phone_number).await.unwrap());

    fx.service.resend(&user.phone_number).await.unwrap();
    let stored = fx.otp_repo.find_by_user(user.id).await.unwrap().unwrap();
    assert!(!stored.verified);
    assert_eq!(stored.expires_at, t0() + Duration::minutes(6));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.service.delete(user.id).await.unwrap();
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());

    // Deleting again is still fine.
    fx.service.delete(user.id).await.unwrap();
}

/// End-to-end timeline from issuance through reset validation:
/// verify at T0+1m succeeds, a replay at T0+2m fails, reset validation
/// at T0+3m passes, and at T0+6m the window has closed.
#[tokio::test]
async fn test_full_timeline_verify_then_reset() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "1234").await;

    fx.clock.set(t0() + Duration::minutes(1));
    assert!(fx.service.verify("1234", &user.phone_number).await.unwrap());

    fx.clock.set(t0() + Duration::minutes(2));
    assert!(!fx.service.verify("1234", &user.phone_number).await.unwrap());

    fx.clock.set(t0() + Duration::minutes(3));
    assert!(fx
        .service
        .validate_for_reset("1234", &user.phone_number)
        .await
        .unwrap());

    fx.clock.set(t0() + Duration::minutes(6));
    assert!(!fx
        .service
        .validate_for_reset("1234", &user.phone_number)
        .await
        .unwrap());
}

/// A code that is never verified inside its window cannot be used after
/// it; the stale record is gone after the failed attempt.
#[tokio::test]
async fn test_full_timeline_unverified_code_lapses() {
    let fx = fixture();
    let user = seed_user(&fx).await;
    seed_code(&fx, &user, "5555").await;

    fx.clock.set(t0() + Duration::minutes(6));
    assert!(!fx.service.verify("5555", &user.phone_number).await.unwrap());
    assert!(fx.otp_repo.find_by_user(user.id).await.unwrap().is_none());
}
