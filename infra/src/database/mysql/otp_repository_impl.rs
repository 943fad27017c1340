//! MySQL implementation of the OtpRepository trait.
//!
//! The `otps` table is keyed by `user_id`, which enforces the
//! one-record-per-user invariant at the schema level; `save` is an
//! upsert over that key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::otp::OtpRecord;
use sb_core::errors::DomainError;
use sb_core::repositories::OtpRepository;

use super::db_err;

/// MySQL-backed OTP persistence.
pub struct MySqlOtpRepository {
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_err("Failed to get user_id", e))?;

        Ok(OtpRecord {
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_err("Invalid UUID", e))?,
            code: row
                .try_get("code")
                .map_err(|e| db_err("Failed to get code", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| db_err("Failed to get expires_at", e))?,
            verified: row
                .try_get("verified")
                .map_err(|e| db_err("Failed to get verified", e))?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        let result = sqlx::query(
            "SELECT user_id, code, expires_at, verified FROM otps WHERE user_id = ? LIMIT 1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_code_and_user(
        &self,
        code: &str,
        user_id: Uuid,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let result = sqlx::query(
            "SELECT user_id, code, expires_at, verified FROM otps \
             WHERE user_id = ? AND code = ? LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        // Last write wins when two issuances race for the same user.
        let query = r#"
            INSERT INTO otps (user_id, code, expires_at, verified)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                expires_at = VALUES(expires_at),
                verified = VALUES(verified)
        "#;

        sqlx::query(query)
            .bind(record.user_id.to_string())
            .bind(&record.code)
            .bind(record.expires_at)
            .bind(record.verified)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to save OTP", e))?;

        Ok(record)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otps WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete OTP", e))?;
        Ok(())
    }
}
