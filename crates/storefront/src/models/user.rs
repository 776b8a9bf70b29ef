//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fashion_cube_core::{Email, UserId};

/// A registered storefront user (without credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at registration.
    pub fullname: String,
    /// Email address, the directory's unique key.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
