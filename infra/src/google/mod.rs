//! Google OAuth token verification.

mod verifier;

pub use verifier::GoogleApiVerifier;
