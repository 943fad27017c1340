//! Favorite service implementation.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::domain::entities::room::RoomSummary;
use crate::errors::{BookingError, DomainResult};
use crate::repositories::{FavoriteRepository, RoomRepository};

/// A favorite joined with the room display data the list view needs.
/// `room` is `None` when the room has since been removed from the
/// catalogue; the favorite itself still exists.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteItem {
    pub favorite: Favorite,
    pub room: Option<RoomSummary>,
}

/// Saved-rooms use cases.
pub struct FavoriteService<F, R>
where
    F: FavoriteRepository,
    R: RoomRepository,
{
    favorite_repository: Arc<F>,
    room_repository: Arc<R>,
}

impl<F, R> FavoriteService<F, R>
where
    F: FavoriteRepository,
    R: RoomRepository,
{
    pub fn new(favorite_repository: Arc<F>, room_repository: Arc<R>) -> Self {
        Self {
            favorite_repository,
            room_repository,
        }
    }

    /// Lists a user's favorites, newest first, enriched with room and
    /// hotel display fields.
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<FavoriteItem>> {
        let favorites = self.favorite_repository.find_by_user(user_id).await?;

        let mut items = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            let room = self.room_repository.find_summary(favorite.room_id).await?;
            items.push(FavoriteItem { favorite, room });
        }
        Ok(items)
    }

    /// Saves a room to the user's favorites. Saving twice is rejected.
    pub async fn add(&self, user_id: Uuid, room_id: Uuid) -> DomainResult<Favorite> {
        if self.room_repository.find_by_id(room_id).await?.is_none() {
            return Err(BookingError::RoomNotFound.into());
        }
        if self
            .favorite_repository
            .exists_by_user_and_room(user_id, room_id)
            .await?
        {
            return Err(BookingError::AlreadyFavorite.into());
        }

        let favorite = self
            .favorite_repository
            .create(Favorite::new(user_id, room_id))
            .await?;

        tracing::info!(
            user_id = %user_id,
            room_id = %room_id,
            event = "favorite_added",
            "Room added to favorites"
        );
        Ok(favorite)
    }

    /// Removes a favorite by its id. Only the owner may remove it.
    pub async fn remove(&self, user_id: Uuid, favorite_id: Uuid) -> DomainResult<()> {
        let favorite = self
            .favorite_repository
            .find_by_id(favorite_id)
            .await?
            .ok_or(BookingError::FavoriteNotFound)?;

        if !favorite.is_owned_by(user_id) {
            return Err(BookingError::NotOwner.into());
        }

        self.favorite_repository.delete(favorite.id).await?;
        tracing::info!(
            user_id = %user_id,
            favorite_id = %favorite_id,
            event = "favorite_removed",
            "Favorite removed"
        );
        Ok(())
    }

    /// Removes the favorite a user has on a room, addressed by room id.
    /// Ownership is implicit in the lookup.
    pub async fn remove_by_room(&self, user_id: Uuid, room_id: Uuid) -> DomainResult<()> {
        let favorite = self
            .favorite_repository
            .find_by_user_and_room(user_id, room_id)
            .await?
            .ok_or(BookingError::FavoriteNotFound)?;

        self.favorite_repository.delete(favorite.id).await?;
        Ok(())
    }

    /// Whether the user has saved the room.
    pub async fn is_favorite(&self, user_id: Uuid, room_id: Uuid) -> DomainResult<bool> {
        self.favorite_repository
            .exists_by_user_and_room(user_id, room_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use crate::repositories::{MockFavoriteRepository, MockRoomRepository};

    struct Fixture {
        service: FavoriteService<MockFavoriteRepository, MockRoomRepository>,
        rooms: Arc<MockRoomRepository>,
    }

    fn fixture() -> Fixture {
        let favorites = Arc::new(MockFavoriteRepository::new());
        let rooms = Arc::new(MockRoomRepository::new());
        let service = FavoriteService::new(favorites, rooms.clone());
        Fixture { service, rooms }
    }

    async fn seed_room(fx: &Fixture) -> Uuid {
        let room_id = Uuid::new_v4();
        fx.rooms
            .insert(RoomSummary {
                room_id,
                room_type: "Standard Twin".to_string(),
                price: 35.0,
                image_url: Some("https://img.example.com/r1.jpg".to_string()),
                hotel_id: Uuid::new_v4(),
                hotel_name: "Harbour View".to_string(),
                hotel_address: "3 Pier Rd".to_string(),
                hotel_city: "Hai Phong".to_string(),
            })
            .await;
        room_id
    }

    #[tokio::test]
    async fn test_add_and_list_with_room_details() {
        let fx = fixture();
        let room_id = seed_room(&fx).await;
        let user_id = Uuid::new_v4();

        fx.service.add(user_id, room_id).await.unwrap();

        let items = fx.service.list(user_id).await.unwrap();
        assert_eq!(items.len(), 1);
        let room = items[0].room.as_ref().unwrap();
        assert_eq!(room.hotel_name, "Harbour View");
    }

    #[tokio::test]
    async fn test_add_duplicate_rejected() {
        let fx = fixture();
        let room_id = seed_room(&fx).await;
        let user_id = Uuid::new_v4();

        fx.service.add(user_id, room_id).await.unwrap();
        let err = fx.service.add(user_id, room_id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Booking(BookingError::AlreadyFavorite)
        ));
    }

    #[tokio::test]
    async fn test_add_unknown_room_rejected() {
        let fx = fixture();
        let err = fx
            .service
            .add(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Booking(BookingError::RoomNotFound)));
    }

    #[tokio::test]
    async fn test_remove_is_owner_only() {
        let fx = fixture();
        let room_id = seed_room(&fx).await;
        let owner = Uuid::new_v4();

        let favorite = fx.service.add(owner, room_id).await.unwrap();

        let err = fx
            .service
            .remove(Uuid::new_v4(), favorite.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Booking(BookingError::NotOwner)));

        fx.service.remove(owner, favorite.id).await.unwrap();
        assert!(!fx.service.is_favorite(owner, room_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_by_room() {
        let fx = fixture();
        let room_id = seed_room(&fx).await;
        let user_id = Uuid::new_v4();

        fx.service.add(user_id, room_id).await.unwrap();
        fx.service.remove_by_room(user_id, room_id).await.unwrap();
        assert!(!fx.service.is_favorite(user_id, room_id).await.unwrap());

        // Removing again reports the missing favorite.
        let err = fx
            .service
            .remove_by_room(user_id, room_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Booking(BookingError::FavoriteNotFound)
        ));
    }
}
