//! Mock implementation of FavoriteRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::errors::DomainError;

use super::repository::FavoriteRepository;

/// In-memory favorite repository for tests
#[derive(Default)]
pub struct MockFavoriteRepository {
    favorites: Arc<RwLock<HashMap<Uuid, Favorite>>>,
}

impl MockFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for MockFavoriteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        let favorites = self.favorites.read().await;
        Ok(favorites.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, DomainError> {
        let favorites = self.favorites.read().await;
        let mut result: Vec<Favorite> = favorites
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .values()
            .find(|f| f.user_id == user_id && f.room_id == room_id)
            .cloned())
    }

    async fn exists_by_user_and_room(
        &self,
        user_id: Uuid,
        room_id: Uuid,
    ) -> Result<bool, DomainError> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .values()
            .any(|f| f.user_id == user_id && f.room_id == room_id))
    }

    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError> {
        let mut favorites = self.favorites.write().await;
        favorites.insert(favorite.id, favorite.clone());
        Ok(favorite)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut favorites = self.favorites.write().await;
        favorites.remove(&id);
        Ok(())
    }
}
