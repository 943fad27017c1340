//! Favorite DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub room_id: Uuid,
}

/// Answer to "is this room in my favorites?"
#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub room_id: Uuid,
    pub is_favorite: bool,
}
