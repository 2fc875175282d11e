//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Internal login identifier; set to the email at registration
    #[serde(skip_serializing)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub is_superuser: bool,
    #[serde(skip_serializing)]
    pub is_staff: bool,
    #[serde(skip_serializing)]
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub date_joined: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Data needed to persist a freshly registered user.
///
/// `password_hash` must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Build a registration record; the login identifier mirrors the email.
    pub fn registration(
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            username: email.clone(),
            email,
            first_name,
            last_name,
            password_hash,
        }
    }
}

/// Profile update.
///
/// `None` leaves a field untouched; a supplied relation list replaces the
/// whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub shops: Option<Vec<i64>>,
    pub favorites: Option<Vec<i64>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
