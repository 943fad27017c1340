//! One-time password record for account activation and password reset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the OTP code (digits)
pub const OTP_CODE_LENGTH: usize = 4;

/// Minutes from issuance until an OTP code expires
pub const OTP_EXPIRY_MINUTES: i64 = 5;

/// One-time password record owned by exactly one user.
///
/// A user has at most one record at a time: re-issuing a code overwrites
/// the existing record's fields in place rather than inserting a second
/// row. Expiry is checked lazily at read time against an explicit
/// timestamp, never stored as a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Identifier of the owning user
    pub user_id: Uuid,

    /// The fixed-length numeric code
    pub code: String,

    /// Timestamp past which the code can no longer be verified
    pub expires_at: DateTime<Utc>,

    /// Set true exactly once by a successful verification
    pub verified: bool,
}

impl OtpRecord {
    /// Creates a fresh record for `user_id` expiring
    /// [`OTP_EXPIRY_MINUTES`] after `now`.
    pub fn new(user_id: Uuid, code: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            code,
            expires_at: now + Duration::minutes(OTP_EXPIRY_MINUTES),
            verified: false,
        }
    }

    /// Overwrites the code, resets the expiry window and clears the
    /// verified flag. Used when a code is re-issued for a user that
    /// already has a record.
    pub fn reissue(&mut self, code: String, now: DateTime<Utc>) {
        self.code = code;
        self.expires_at = now + Duration::minutes(OTP_EXPIRY_MINUTES);
        self.verified = false;
    }

    /// A record is expired once `now` reaches `expires_at`. There is no
    /// sliding extension.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks the submitted code against the stored one.
    pub fn matches(&self, code: &str) -> bool {
        self.code == code
    }

    /// Marks the record as verified.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }
}
