//! JWT access token issuance and verification.

mod claims;
mod service;

pub use claims::Claims;
pub use service::TokenService;
