use serde::Serialize;

use crate::domain::entities::user::User;

/// Successful authentication result returned to the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
}
