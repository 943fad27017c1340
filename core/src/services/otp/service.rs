//! OTP state machine implementation.

use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use sb_shared::utils::validation::mask_phone;

use crate::domain::entities::otp::{OtpRecord, OTP_CODE_LENGTH};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};

use super::clock::Clock;
use super::traits::DeliveryGateway;

/// Orchestrates the OTP lifecycle: issue, resend, verify, validate for
/// password reset, delete.
///
/// Records move `Active-Unverified -> Active-Verified -> deleted`; an
/// expired record is detected lazily at verification time and purged
/// there rather than by a background sweeper. Each operation is a single
/// request-scoped read-modify-write; two concurrent issuances for the
/// same user resolve last-write-wins.
pub struct OtpService<O, U, D, C>
where
    O: OtpRepository,
    U: UserRepository,
    D: DeliveryGateway,
    C: Clock,
{
    otp_repository: Arc<O>,
    user_repository: Arc<U>,
    delivery: Arc<D>,
    clock: Arc<C>,
}

impl<O, U, D, C> OtpService<O, U, D, C>
where
    O: OtpRepository,
    U: UserRepository,
    D: DeliveryGateway,
    C: Clock,
{
    pub fn new(
        otp_repository: Arc<O>,
        user_repository: Arc<U>,
        delivery: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            otp_repository,
            user_repository,
            delivery,
            clock,
        }
    }

    /// Generates a fresh fixed-length numeric code from a uniform random
    /// source. No uniqueness is guaranteed or required across users or
    /// time.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..10u32.pow(OTP_CODE_LENGTH as u32));
        format!("{:0width$}", code, width = OTP_CODE_LENGTH)
    }

    /// Issues a code for `user` and dispatches it to the user's contact
    /// channel, email preferred.
    ///
    /// If the user already has a record its fields are overwritten in
    /// place; otherwise a new record is created. Email delivery failure
    /// does not fail the operation: the code is re-dispatched over the
    /// fallback channel instead.
    pub async fn issue(&self, user: &User) -> DomainResult<OtpRecord> {
        let record = self.upsert_record(user.id).await?;

        if !user.email.is_empty() {
            match self.delivery.send_email(&user.email, &record.code).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.id,
                        event = "otp_issued",
                        channel = "email",
                        "OTP issued and sent via email"
                    );
                }
                Err(e) => {
                    // Deliberate policy: recover via the fallback channel,
                    // but loudly, so persistent outages stay visible.
                    tracing::warn!(
                        user_id = %user.id,
                        error = %e,
                        event = "otp_email_fallback",
                        "Email delivery failed, falling back to SMS/log channel"
                    );
                    self.delivery
                        .send_fallback(&user.phone_number, &record.code)
                        .await;
                }
            }
        } else {
            self.delivery
                .send_fallback(&user.phone_number, &record.code)
                .await;
        }

        Ok(record)
    }

    /// Issues a code for a phone-number change. Persistence is identical
    /// to [`issue`], but dispatch always targets `new_phone` over the
    /// fallback channel; the channel is fixed, never silently re-routed.
    ///
    /// [`issue`]: OtpService::issue
    pub async fn issue_for_contact_change(
        &self,
        user: &User,
        new_phone: &str,
    ) -> DomainResult<OtpRecord> {
        let record = self.upsert_record(user.id).await?;

        tracing::info!(
            user_id = %user.id,
            new_phone = %mask_phone(new_phone),
            event = "otp_issued_phone_change",
            "OTP issued for phone number change"
        );
        self.delivery.send_fallback(new_phone, &record.code).await;

        Ok(record)
    }

    /// Verifies `code` for the user registered under `phone`.
    ///
    /// Returns `false` without mutation when the user or record is
    /// absent, the code does not match, or the record was already
    /// verified. An expired record is deleted as a side effect of the
    /// failed attempt. On success the record is marked verified; a code
    /// verifies successfully exactly once.
    pub async fn verify(&self, code: &str, phone: &str) -> DomainResult<bool> {
        let user = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => user,
            None => {
                tracing::warn!(
                    phone = %mask_phone(phone),
                    event = "otp_verify_unknown_user",
                    "OTP verification for unknown phone number"
                );
                return Ok(false);
            }
        };

        self.verify_for_user(code, &user).await
    }

    /// Same as [`verify`], but for an already-resolved user (used by the
    /// phone-change flow where the authenticated identity is explicit).
    ///
    /// [`verify`]: OtpService::verify
    pub async fn verify_for_user(&self, code: &str, user: &User) -> DomainResult<bool> {
        let record = match self
            .otp_repository
            .find_by_code_and_user(code, user.id)
            .await?
        {
            Some(record) => record,
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    event = "otp_verify_failed",
                    reason = "invalid_code",
                    "OTP code does not match"
                );
                return Ok(false);
            }
        };

        if record.verified {
            tracing::warn!(
                user_id = %user.id,
                event = "otp_verify_failed",
                reason = "already_verified",
                "OTP already verified"
            );
            return Ok(false);
        }

        if record.is_expired(self.clock.now()) {
            // Expired codes are purged, not left around for reuse.
            self.otp_repository.delete_by_user(user.id).await?;
            tracing::warn!(
                user_id = %user.id,
                event = "otp_verify_failed",
                reason = "expired",
                "OTP expired; record deleted"
            );
            return Ok(false);
        }

        let mut record = record;
        record.mark_verified();
        self.otp_repository.save(record).await?;

        tracing::info!(
            user_id = %user.id,
            event = "otp_verified",
            "OTP verified successfully"
        );
        Ok(true)
    }

    /// Read-only check used by the password-reset step: the record must
    /// exist, match `code`, already be verified (at the OTP screen) and
    /// not yet be expired. Never mutates or deletes, even on expiry; the
    /// caller cleans up.
    pub async fn validate_for_reset(&self, code: &str, phone: &str) -> DomainResult<bool> {
        let user = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => user,
            None => {
                tracing::warn!(
                    phone = %mask_phone(phone),
                    event = "otp_reset_validation_failed",
                    reason = "unknown_user",
                    "Password reset validation for unknown phone number"
                );
                return Ok(false);
            }
        };

        let record = match self
            .otp_repository
            .find_by_code_and_user(code, user.id)
            .await?
        {
            Some(record) => record,
            None => return Ok(false),
        };

        if !record.verified {
            tracing::warn!(
                user_id = %user.id,
                event = "otp_reset_validation_failed",
                reason = "not_verified",
                "OTP has not been verified yet"
            );
            return Ok(false);
        }

        if record.is_expired(self.clock.now()) {
            tracing::warn!(
                user_id = %user.id,
                event = "otp_reset_validation_failed",
                reason = "expired",
                "OTP expired since verification"
            );
            return Ok(false);
        }

        Ok(true)
    }

    /// Re-issues a code for the user registered under `phone`, fully
    /// resetting the record state. Unlike [`verify`], an unknown user is
    /// an error here.
    ///
    /// [`verify`]: OtpService::verify
    pub async fn resend(&self, phone: &str) -> DomainResult<OtpRecord> {
        let user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let record = self.issue(&user).await?;
        tracing::info!(
            user_id = %user.id,
            event = "otp_resent",
            "OTP re-issued"
        );
        Ok(record)
    }

    /// Removes any record owned by `user_id`. Idempotent: a missing
    /// record is a no-op, not an error.
    pub async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        self.otp_repository.delete_by_user(user_id).await
    }

    /// Overwrite-or-create the record for `user_id` with a fresh code
    /// and expiry window.
    async fn upsert_record(&self, user_id: Uuid) -> DomainResult<OtpRecord> {
        let code = Self::generate_code();
        let now = self.clock.now();

        let record = match self.otp_repository.find_by_user(user_id).await? {
            Some(mut existing) => {
                existing.reissue(code, now);
                existing
            }
            None => OtpRecord::new(user_id, code, now),
        };

        self.otp_repository.save(record).await
    }
}
