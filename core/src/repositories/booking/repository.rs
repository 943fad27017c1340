//! Booking repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

/// Repository contract for [`Booking`] entities.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// All bookings made by a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    /// Bookings with a check-in date on or after `today` that are not
    /// cancelled, soonest first
    async fn find_upcoming(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Bookings whose check-out date has passed, most recent first
    async fn find_past(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Persist a new booking
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Update an existing booking
    async fn update(&self, booking: Booking) -> Result<Booking, DomainError>;
}
