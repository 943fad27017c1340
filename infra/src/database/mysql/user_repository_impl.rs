//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::user::{Gender, User};
use sb_core::errors::DomainError;
use sb_core::repositories::UserRepository;

use super::db_err;

const USER_COLUMNS: &str = "id, full_name, email, phone_number, password_hash, \
     date_of_birth, gender, enabled, created_at, updated_at";

/// MySQL-backed user persistence.
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;

        let gender: Option<String> = row
            .try_get("gender")
            .map_err(|e| db_err("Failed to get gender", e))?;
        let gender = gender.as_deref().map(|g| match g {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        });

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| db_err("Invalid UUID", e))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| db_err("Failed to get full_name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| db_err("Failed to get email", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| db_err("Failed to get phone_number", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| db_err("Failed to get password_hash", e))?,
            date_of_birth: row
                .try_get::<Option<NaiveDate>, _>("date_of_birth")
                .map_err(|e| db_err("Failed to get date_of_birth", e))?,
            gender,
            enabled: row
                .try_get("enabled")
                .map_err(|e| db_err("Failed to get enabled", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_err("Failed to get updated_at", e))?,
        })
    }

    fn gender_str(gender: Option<Gender>) -> Option<&'static str> {
        gender.map(|g| match g {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? LIMIT 1",
            USER_COLUMNS, column
        );

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.find_one("phone_number", phone).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;
        Ok(count > 0)
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone_number = ?")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;
        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, full_name, email, phone_number, password_hash,
                               date_of_birth, gender, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(user.date_of_birth)
            .bind(Self::gender_str(user.gender))
            .bind(user.enabled)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to insert user", e))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET full_name = ?, email = ?, phone_number = ?, password_hash = ?,
                date_of_birth = ?, gender = ?, enabled = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(user.date_of_birth)
            .bind(Self::gender_str(user.gender))
            .bind(user.enabled)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update user", e))?;

        // MySQL reports zero affected rows for a no-change update too, so
        // only a missing row is an error.
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }
}
