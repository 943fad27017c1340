mod mock;
mod repository;

pub use mock::MockFavoriteRepository;
pub use repository::FavoriteRepository;
