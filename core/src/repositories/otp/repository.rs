//! OTP repository trait: the persistence boundary of the OTP state
//! machine.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainError;

/// Repository contract for [`OtpRecord`]s.
///
/// The store holds at most one record per user. `save` has explicit
/// update-in-place semantics: saving a record for a user that already
/// has one replaces that record's fields, it never inserts a second row.
/// No query shapes beyond the four below are required.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Find the record owned by `user_id`, if any
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OtpRecord>, DomainError>;

    /// Find the record owned by `user_id` whose stored code equals `code`
    async fn find_by_code_and_user(
        &self,
        code: &str,
        user_id: Uuid,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Upsert the record keyed by its `user_id`
    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Remove the record owned by `user_id`. A no-op if none exists.
    async fn delete_by_user(&self, user_id: Uuid) -> Result<(), DomainError>;
}
