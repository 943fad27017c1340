//! MySQL implementation of the BookingRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sb_core::domain::entities::booking::{Booking, BookingStatus};
use sb_core::errors::DomainError;
use sb_core::repositories::BookingRepository;

use super::db_err;

const BOOKING_COLUMNS: &str = "id, user_id, room_id, check_in, check_out, total_price, \
     status, adults_count, children_count, infants_count, created_at";

/// MySQL-backed booking persistence.
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &sqlx::mysql::MySqlRow) -> Result<Booking, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_err("Failed to get user_id", e))?;
        let room_id: String = row
            .try_get("room_id")
            .map_err(|e| db_err("Failed to get room_id", e))?;

        let status: String = row
            .try_get("status")
            .map_err(|e| db_err("Failed to get status", e))?;
        let status = match status.as_str() {
            "PENDING" => BookingStatus::Pending,
            "CONFIRMED" => BookingStatus::Confirmed,
            "CANCELLED" => BookingStatus::Cancelled,
            other => {
                return Err(DomainError::Database {
                    message: format!("Unknown booking status: {}", other),
                })
            }
        };

        Ok(Booking {
            id: Uuid::parse_str(&id).map_err(|e| db_err("Invalid UUID", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_err("Invalid UUID", e))?,
            room_id: Uuid::parse_str(&room_id).map_err(|e| db_err("Invalid UUID", e))?,
            check_in: row
                .try_get::<NaiveDate, _>("check_in")
                .map_err(|e| db_err("Failed to get check_in", e))?,
            check_out: row
                .try_get::<NaiveDate, _>("check_out")
                .map_err(|e| db_err("Failed to get check_out", e))?,
            total_price: row
                .try_get("total_price")
                .map_err(|e| db_err("Failed to get total_price", e))?,
            status,
            adults_count: row
                .try_get("adults_count")
                .map_err(|e| db_err("Failed to get adults_count", e))?,
            children_count: row
                .try_get("children_count")
                .map_err(|e| db_err("Failed to get children_count", e))?,
            infants_count: row
                .try_get("infants_count")
                .map_err(|e| db_err("Failed to get infants_count", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
        })
    }

    fn status_str(status: BookingStatus) -> &'static str {
        match status {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    async fn fetch_list(
        &self,
        query: String,
        user_id: Uuid,
        today: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut q = sqlx::query(&query).bind(user_id.to_string());
        if let Some(today) = today {
            q = q.bind(today);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {} FROM bookings WHERE id = ? LIMIT 1", BOOKING_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE user_id = ? ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );
        self.fetch_list(query, user_id, None).await
    }

    async fn find_upcoming(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings \
             WHERE user_id = ? AND check_in >= ? AND status <> 'CANCELLED' \
             ORDER BY check_in ASC",
            BOOKING_COLUMNS
        );
        self.fetch_list(query, user_id, Some(today)).await
    }

    async fn find_past(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings \
             WHERE user_id = ? AND check_out < ? \
             ORDER BY check_out DESC",
            BOOKING_COLUMNS
        );
        self.fetch_list(query, user_id, Some(today)).await
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let query = r#"
            INSERT INTO bookings (id, user_id, room_id, check_in, check_out, total_price,
                                  status, adults_count, children_count, infants_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(booking.id.to_string())
            .bind(booking.user_id.to_string())
            .bind(booking.room_id.to_string())
            .bind(booking.check_in)
            .bind(booking.check_out)
            .bind(booking.total_price)
            .bind(Self::status_str(booking.status))
            .bind(booking.adults_count)
            .bind(booking.children_count)
            .bind(booking.infants_count)
            .bind(booking.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to insert booking", e))?;

        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let result = sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
            .bind(Self::status_str(booking.status))
            .bind(booking.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update booking", e))?;

        // MySQL reports zero affected rows for a no-change update too, so
        // only a missing row is an error.
        if result.rows_affected() == 0 && self.find_by_id(booking.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "Booking".to_string(),
            });
        }

        Ok(booking)
    }
}
