//! Per-user cart repository.

use fashion_cube_core::{Cart, UserId};

use super::RepositoryError;
use crate::storage::{self, KeyValueStore, keys};

/// Repository for carts stored under `cart_{user_id}`.
pub struct CartRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Read a user's cart, or a fresh empty one if none is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read or the
    /// stored cart does not decode.
    pub fn get(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        let cart = storage::get_json(self.store, &keys::cart(user_id))?;
        Ok(cart.unwrap_or_else(|| Cart::empty(user_id.clone())))
    }

    /// Atomically mutate a user's cart and persist the result.
    ///
    /// `f` sees the stored cart (or a fresh empty one) and its return value
    /// is handed back alongside the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read or
    /// written.
    pub fn modify<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut Cart) -> R,
    ) -> Result<(Cart, R), RepositoryError> {
        storage::update_json(self.store, &keys::cart(user_id), |cart: Option<Cart>| {
            let mut cart = cart.unwrap_or_else(|| Cart::empty(user_id.clone()));
            let result = f(&mut cart);
            Ok::<_, RepositoryError>((cart.clone(), (cart, result)))
        })
    }
}
