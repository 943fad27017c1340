mod mock;
mod repository;

pub use mock::MockRoomRepository;
pub use repository::RoomRepository;
