//! Notification DTOs.

use serde::Serialize;

/// Unread notification badge count.
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}
