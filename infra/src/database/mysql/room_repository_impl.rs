//! MySQL implementation of the RoomRepository trait (read side).

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::room::{Room, RoomSummary};
use sb_core::errors::DomainError;
use sb_core::repositories::RoomRepository;

use super::db_err;

/// MySQL-backed room catalogue reads.
pub struct MySqlRoomRepository {
    pool: MySqlPool,
}

impl MySqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for MySqlRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        let result = sqlx::query(
            "SELECT id, hotel_id, room_type, price FROM rooms WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Database query failed", e))?;

        let row = match result {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
        let hotel_id: String = row
            .try_get("hotel_id")
            .map_err(|e| db_err("Failed to get hotel_id", e))?;

        Ok(Some(Room {
            id: Uuid::parse_str(&id).map_err(|e| db_err("Invalid UUID", e))?,
            hotel_id: Uuid::parse_str(&hotel_id).map_err(|e| db_err("Invalid UUID", e))?,
            room_type: row
                .try_get("room_type")
                .map_err(|e| db_err("Failed to get room_type", e))?,
            price: row
                .try_get("price")
                .map_err(|e| db_err("Failed to get price", e))?,
        }))
    }

    async fn find_summary(&self, room_id: Uuid) -> Result<Option<RoomSummary>, DomainError> {
        let query = r#"
            SELECT r.id AS room_id, r.room_type, r.price, r.image_url,
                   h.id AS hotel_id, h.name AS hotel_name,
                   h.address AS hotel_address, h.city AS hotel_city
            FROM rooms r
            JOIN hotels h ON h.id = r.hotel_id
            WHERE r.id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(room_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        let row = match result {
            Some(row) => row,
            None => return Ok(None),
        };

        let room_id: String = row
            .try_get("room_id")
            .map_err(|e| db_err("Failed to get room_id", e))?;
        let hotel_id: String = row
            .try_get("hotel_id")
            .map_err(|e| db_err("Failed to get hotel_id", e))?;

        Ok(Some(RoomSummary {
            room_id: Uuid::parse_str(&room_id).map_err(|e| db_err("Invalid UUID", e))?,
            room_type: row
                .try_get("room_type")
                .map_err(|e| db_err("Failed to get room_type", e))?,
            price: row
                .try_get("price")
                .map_err(|e| db_err("Failed to get price", e))?,
            image_url: row
                .try_get("image_url")
                .map_err(|e| db_err("Failed to get image_url", e))?,
            hotel_id: Uuid::parse_str(&hotel_id).map_err(|e| db_err("Invalid UUID", e))?,
            hotel_name: row
                .try_get("hotel_name")
                .map_err(|e| db_err("Failed to get hotel_name", e))?,
            hotel_address: row
                .try_get("hotel_address")
                .map_err(|e| db_err("Failed to get hotel_address", e))?,
            hotel_city: row
                .try_get("hotel_city")
                .map_err(|e| db_err("Failed to get hotel_city", e))?,
        }))
    }
}
