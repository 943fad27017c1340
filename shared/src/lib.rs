//! Shared utilities and common types for the StayBooking server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope types
//! - Validation utilities (email, phone, OTP code format)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, EmailConfig, JwtConfig, ServerConfig};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;
