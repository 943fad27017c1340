//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainError;

use super::repository::OtpRepository;

/// In-memory OTP store for tests. The map key is the owning user id,
/// which makes the one-record-per-user invariant structural.
#[derive(Default)]
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
}

impl MockOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn find_by_code_and_user(
        &self,
        code: &str,
        user_id: Uuid,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .get(&user_id)
            .filter(|r| r.code == code)
            .cloned())
    }

    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.remove(&user_id);
        Ok(())
    }
}
