//! Common type definitions shared across server layers

mod response;

pub use response::{ApiResponse, ErrorResponse};
