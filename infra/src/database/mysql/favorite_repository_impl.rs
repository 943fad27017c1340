//! MySQL implementation of the FavoriteRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::favorite::Favorite;
use sb_core::errors::DomainError;
use sb_core::repositories::FavoriteRepository;

use super::db_err;

/// MySQL-backed favorite persistence.
pub struct MySqlFavoriteRepository {
    pool: MySqlPool,
}

impl MySqlFavoriteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_favorite(row: &sqlx::mysql::MySqlRow) -> Result<Favorite, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_err("Failed to get user_id", e))?;
        let room_id: String = row
            .try_get("room_id")
            .map_err(|e| db_err("Failed to get room_id", e))?;

        Ok(Favorite {
            id: Uuid::parse_str(&id).map_err(|e| db_err("Invalid UUID", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_err("Invalid UUID", e))?,
            room_id: Uuid::parse_str(&room_id).map_err(|e| db_err("Invalid UUID", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
        })
    }
}

#[async_trait]
impl FavoriteRepository for MySqlFavoriteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        let result = sqlx::query(
            "SELECT id, user_id, room_id, created_at FROM favorites WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_favorite(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, user_id, room_id, created_at FROM favorites \
             WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_favorite).collect()
    }

    async fn find_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError> {
        let result = sqlx::query(
            "SELECT id, user_id, room_id, created_at FROM favorites \
             WHERE user_id = ? AND room_id = ? LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(room_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_favorite(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ? AND room_id = ?",
        )
        .bind(user_id.to_string())
        .bind(room_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;
        Ok(count > 0)
    }

    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError> {
        sqlx::query(
            "INSERT INTO favorites (id, user_id, room_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(favorite.id.to_string())
        .bind(favorite.user_id.to_string())
        .bind(favorite.room_id.to_string())
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert favorite", e))?;

        Ok(favorite)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete favorite", e))?;
        Ok(())
    }
}
