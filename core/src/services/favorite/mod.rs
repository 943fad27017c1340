//! Saved rooms (favorites).

mod service;

pub use service::{FavoriteItem, FavoriteService};
