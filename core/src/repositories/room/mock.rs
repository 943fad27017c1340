//! Mock implementation of RoomRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::room::{Room, RoomSummary};
use crate::errors::DomainError;

use super::repository::RoomRepository;

/// In-memory room catalogue for tests; seed rooms with [`insert`].
///
/// [`insert`]: MockRoomRepository::insert
#[derive(Default)]
pub struct MockRoomRepository {
    rooms: Arc<RwLock<HashMap<Uuid, RoomSummary>>>,
}

impl MockRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalogue with a room summary.
    pub async fn insert(&self, summary: RoomSummary) {
        let mut rooms = self.rooms.write().await;
        rooms.insert(summary.room_id, summary);
    }
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&id).map(|s| Room {
            id: s.room_id,
            hotel_id: s.hotel_id,
            room_type: s.room_type.clone(),
            price: s.price,
        }))
    }

    async fn find_summary(&self, room_id: Uuid) -> Result<Option<RoomSummary>, DomainError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&room_id).cloned())
    }
}
