//! Account lifecycle: registration, activation, login and profile
//! management.

mod response;
mod service;
mod traits;

pub use response::AuthResponse;
pub use service::{AuthService, NewUser, ProfileUpdate, ProfileUpdateOutcome};
pub use traits::{GoogleProfile, GoogleTokenVerifier};
