//! User entity representing a registered account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender of the account holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// User entity representing a registered account.
///
/// Accounts start disabled: registration creates the row with a temporary
/// password hash, and the account is enabled once the OTP is verified and
/// a real password is set (or immediately for Google sign-in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub full_name: String,

    /// Email address, unique across accounts
    pub email: String,

    /// Phone number, unique across accounts; OTP fallback channel
    pub phone_number: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Date of birth, if provided
    pub date_of_birth: Option<NaiveDate>,

    /// Gender, if provided
    pub gender: Option<Gender>,

    /// Whether the account has completed activation
    pub enabled: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not-yet-activated user.
    pub fn new(
        full_name: String,
        email: String,
        phone_number: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            phone_number,
            password_hash,
            date_of_birth: None,
            gender: None,
            enabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Enables the account after successful activation.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }

    /// Replaces the registered phone number (after an OTP round-trip).
    pub fn set_phone_number(&mut self, phone: String) {
        self.phone_number = phone;
        self.updated_at = Utc::now();
    }
}
