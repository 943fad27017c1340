//! Favorite entity linking a user to a saved room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A room saved to a user's favorites list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Unique identifier for the favorite
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Saved room
    pub room_id: Uuid,

    /// Timestamp when the favorite was created
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Uuid, room_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            room_id,
            created_at: Utc::now(),
        }
    }

    /// Whether this favorite belongs to the given user.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
