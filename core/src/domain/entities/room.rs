//! Room catalogue types (read side).
//!
//! Rooms and hotels are managed elsewhere; this service only reads them
//! for price calculation and display enrichment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier for the room
    pub id: Uuid,

    /// Hotel this room belongs to
    pub hotel_id: Uuid,

    /// Room type label (e.g. "Deluxe Double")
    pub room_type: String,

    /// Price per guest per night
    pub price: f64,
}

/// Room plus the hotel display fields needed by booking and favorite
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: Uuid,
    pub room_type: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_city: String,
}
