//! Favorite repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::errors::DomainError;

/// Repository contract for [`Favorite`] entities.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Find a favorite by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError>;

    /// All favorites of a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, DomainError>;

    /// The favorite linking `user_id` to `room_id`, if any
    async fn find_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError>;

    /// Whether the user has saved the room
    async fn exists_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<bool, DomainError>;

    /// Persist a new favorite
    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError>;

    /// Remove a favorite by id. A no-op if none exists.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
