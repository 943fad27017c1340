//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::errors::DomainError;

use super::repository::BookingRepository;

/// In-memory booking repository for tests
#[derive(Default)]
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_upcoming(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| {
                b.user_id == user_id
                    && b.check_in >= today
                    && b.status != BookingStatus::Cancelled
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| a.check_in.cmp(&b.check_in));
        Ok(result)
    }

    async fn find_past(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.user_id == user_id && b.check_out < today)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.check_out.cmp(&a.check_out));
        Ok(result)
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;
        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound {
                resource: "Booking".to_string(),
            });
        }
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }
}
