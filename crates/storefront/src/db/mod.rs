//! Repositories over the key-value store.
//!
//! Both the API server and the client fallback path persist their records
//! through these repositories, so the on-disk layout is the same on either
//! side:
//!
//! - `ecommerce_users` - user directory (argon2 password hashes, never clear text)
//! - `cart_{user_id}` - one cart per user
//! - `user_token` - the client's current session
//! - `products` - the server's seeded catalog

pub mod carts;
pub mod products;
pub mod sessions;
pub mod users;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
