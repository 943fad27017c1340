//! Booking service implementation.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::errors::{BookingError, DomainResult};
use crate::repositories::{BookingRepository, NotificationRepository, RoomRepository};

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults_count: u32,
    pub children_count: u32,
    pub infants_count: u32,
}

/// Booking use cases. Every mutating operation takes the acting user
/// explicitly and enforces ownership before touching the record.
pub struct BookingService<B, R, N>
where
    B: BookingRepository,
    R: RoomRepository,
    N: NotificationRepository,
{
    booking_repository: Arc<B>,
    room_repository: Arc<R>,
    notification_repository: Arc<N>,
}

impl<B, R, N> BookingService<B, R, N>
where
    B: BookingRepository,
    R: RoomRepository,
    N: NotificationRepository,
{
    pub fn new(
        booking_repository: Arc<B>,
        room_repository: Arc<R>,
        notification_repository: Arc<N>,
    ) -> Self {
        Self {
            booking_repository,
            room_repository,
            notification_repository,
        }
    }

    /// Creates a pending booking and notifies the guest.
    ///
    /// Total price is `room price x priced guests x nights`, where
    /// infants are not counted. The stay must cover at least one night.
    pub async fn create(&self, user_id: Uuid, input: NewBooking) -> DomainResult<Booking> {
        let summary = self
            .room_repository
            .find_summary(input.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound)?;

        let nights = Booking::nights(input.check_in, input.check_out);
        if nights <= 0 {
            return Err(BookingError::InvalidStayLength.into());
        }

        let priced_guests = input.adults_count + input.children_count;
        let total_price = summary.price * priced_guests as f64 * nights as f64;

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            room_id: input.room_id,
            check_in: input.check_in,
            check_out: input.check_out,
            total_price,
            status: BookingStatus::Pending,
            adults_count: input.adults_count,
            children_count: input.children_count,
            infants_count: input.infants_count,
            created_at: Utc::now(),
        };

        let booking = self.booking_repository.create(booking).await?;

        self.notify(
            user_id,
            "Booking placed".to_string(),
            format!(
                "Your booking at {} was placed successfully. Reference: #{}",
                summary.hotel_name,
                short_ref(booking.id)
            ),
            NotificationKind::BookingSuccess,
            booking.id,
        )
        .await?;

        tracing::info!(
            user_id = %user_id,
            booking_id = %booking.id,
            room_id = %booking.room_id,
            nights,
            event = "booking_created",
            "Booking created"
        );
        Ok(booking)
    }

    /// Loads a single booking.
    pub async fn get(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::NotFound.into())
    }

    /// Confirms a pending booking. Only the owner may confirm.
    pub async fn confirm(&self, user_id: Uuid, booking_id: Uuid) -> DomainResult<Booking> {
        let mut booking = self.get(booking_id).await?;
        if !booking.is_owned_by(user_id) {
            return Err(BookingError::NotOwner.into());
        }

        booking.confirm();
        let booking = self.booking_repository.update(booking).await?;

        let hotel_name = self.hotel_name(booking.room_id).await?;
        self.notify(
            user_id,
            "Booking confirmed".to_string(),
            format!(
                "Your booking at {} (#{}) has been confirmed. Enjoy your stay!",
                hotel_name,
                short_ref(booking.id)
            ),
            NotificationKind::BookingConfirmed,
            booking.id,
        )
        .await?;

        tracing::info!(
            user_id = %user_id,
            booking_id = %booking.id,
            event = "booking_confirmed",
            "Booking confirmed"
        );
        Ok(booking)
    }

    /// Cancels a booking. Only the owner may cancel.
    pub async fn cancel(&self, user_id: Uuid, booking_id: Uuid) -> DomainResult<Booking> {
        let mut booking = self.get(booking_id).await?;
        if !booking.is_owned_by(user_id) {
            return Err(BookingError::NotOwner.into());
        }

        booking.cancel();
        let booking = self.booking_repository.update(booking).await?;

        let hotel_name = self.hotel_name(booking.room_id).await?;
        self.notify(
            user_id,
            "Booking cancelled".to_string(),
            format!(
                "Your booking at {} (#{}) has been cancelled.",
                hotel_name,
                short_ref(booking.id)
            ),
            NotificationKind::BookingCancelled,
            booking.id,
        )
        .await?;

        tracing::info!(
            user_id = %user_id,
            booking_id = %booking.id,
            event = "booking_cancelled",
            "Booking cancelled"
        );
        Ok(booking)
    }

    /// All bookings of a user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.booking_repository.find_by_user(user_id).await
    }

    /// Bookings with a check-in today or later that are not cancelled,
    /// soonest first.
    pub async fn upcoming(&self, user_id: Uuid, today: NaiveDate) -> DomainResult<Vec<Booking>> {
        self.booking_repository.find_upcoming(user_id, today).await
    }

    /// Bookings whose stay already ended, regardless of status, most
    /// recent first.
    pub async fn past(&self, user_id: Uuid, today: NaiveDate) -> DomainResult<Vec<Booking>> {
        self.booking_repository.find_past(user_id, today).await
    }

    async fn hotel_name(&self, room_id: Uuid) -> DomainResult<String> {
        Ok(self
            .room_repository
            .find_summary(room_id)
            .await?
            .map(|s| s.hotel_name)
            .unwrap_or_else(|| "the hotel".to_string()))
    }

    async fn notify(
        &self,
        user_id: Uuid,
        title: String,
        message: String,
        kind: NotificationKind,
        booking_id: Uuid,
    ) -> DomainResult<()> {
        let notification = Notification::new(user_id, title, message, kind, Some(booking_id));
        self.notification_repository.create(notification).await?;
        Ok(())
    }
}

/// Short human-readable booking reference.
fn short_ref(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
