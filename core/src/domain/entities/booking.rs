//! Booking entity and its status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle status: `Pending` until the guest confirms or
/// cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A room booking made by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,

    /// User who made the booking
    pub user_id: Uuid,

    /// Booked room
    pub room_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Total price: room price x guests x nights
    pub total_price: f64,

    /// Current lifecycle status
    pub status: BookingStatus,

    /// Number of adult guests
    pub adults_count: u32,

    /// Number of child guests
    pub children_count: u32,

    /// Number of infant guests (not counted in pricing)
    pub infants_count: u32,

    /// Timestamp when the booking was created
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights between check-in and check-out. Negative or zero
    /// ranges are the caller's responsibility to reject.
    pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        (check_out - check_in).num_days()
    }

    /// Guests counted for pricing (adults + children)
    pub fn priced_guests(&self) -> u32 {
        self.adults_count + self.children_count
    }

    /// Marks the booking confirmed.
    pub fn confirm(&mut self) {
        self.status = BookingStatus::Confirmed;
    }

    /// Marks the booking cancelled.
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// Whether this booking belongs to the given user.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
