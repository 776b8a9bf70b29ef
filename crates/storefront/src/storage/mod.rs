//! Key-value persistence behind an injectable trait.
//!
//! The client keeps its fallback state (user directory, per-user carts, the
//! current session token) in a small string-keyed store, the way a browser
//! keeps it in `localStorage`. The API server keeps its records in the same
//! kind of store. Values are JSON documents.
//!
//! # Keys
//!
//! ```text
//! ecommerce_users     → JSON array of user records
//! cart_{user_id}      → JSON cart object
//! user_token          → JSON session token of the logged-in user
//! products            → JSON array of catalog products (server)
//! ```
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local, used by tests and ephemeral runs
//! - [`FileStore`] - a single JSON file, rewritten atomically on each write

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use fashion_cube_core::UserId;

/// Storage keys.
pub mod keys {
    use super::UserId;

    /// Key holding the serialized user directory.
    pub const USERS: &str = "ecommerce_users";

    /// Key holding the current session token.
    pub const SESSION: &str = "user_token";

    /// Key holding the seeded product catalog.
    pub const PRODUCTS: &str = "products";

    /// Key holding a user's cart.
    #[must_use]
    pub fn cart(user_id: &UserId) -> String {
        format!("cart_{user_id}")
    }
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value is not valid JSON for the expected type.
    #[error("stored value is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    /// An update closure was never invoked by the store.
    #[error("update was not applied")]
    UpdateNotApplied,
}

/// Outcome of an in-place update closure.
///
/// `Some(value)` replaces the stored value; `None` leaves it untouched.
pub type UpdateResult = Result<Option<String>, StorageError>;

/// A synchronous string key-value store (get/set/remove by key).
///
/// Implementations must make [`update`](Self::update) atomic with respect to
/// other calls on the same store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read-modify-write a value under the store's lock.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `StorageError` if the backing store
    /// cannot be read or written.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<&str>) -> UpdateResult,
    ) -> Result<(), StorageError>;
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if the read fails or the value does not decode.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode and write a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails.
pub fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Atomically decode, transform and re-encode a JSON value.
///
/// `f` receives the current value (or `None`) and returns the value to store
/// together with a result for the caller. If `f` fails, nothing is written
/// and its error is returned.
///
/// # Errors
///
/// Returns `f`'s error, or a `StorageError` (converted into `E`) if the
/// store cannot be read, decoded or written.
pub fn update_json<T, R, E>(
    store: &dyn KeyValueStore,
    key: &str,
    f: impl FnOnce(Option<T>) -> Result<(T, R), E>,
) -> Result<R, E>
where
    T: Serialize + DeserializeOwned,
    E: From<StorageError>,
{
    let mut f = Some(f);
    let mut outcome: Option<Result<R, E>> = None;

    store.update(key, &mut |current| {
        let Some(f) = f.take() else {
            return Ok(None);
        };
        let current = current.map(serde_json::from_str::<T>).transpose()?;
        match f(current) {
            Ok((next, result)) => {
                let raw = serde_json::to_string(&next)?;
                outcome = Some(Ok(result));
                Ok(Some(raw))
            }
            Err(e) => {
                outcome = Some(Err(e));
                Ok(None)
            }
        }
    })?;

    outcome.unwrap_or_else(|| Err(StorageError::UpdateNotApplied.into()))
}
