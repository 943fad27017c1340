//! Room repository trait (read-only catalogue access).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::room::{Room, RoomSummary};
use crate::errors::DomainError;

/// Read-side contract for the room catalogue.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError>;

    /// Room plus hotel display fields, for response enrichment
    async fn find_summary(&self, room_id: Uuid) -> Result<Option<RoomSummary>, DomainError>;
}
