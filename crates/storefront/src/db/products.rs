//! Seeded catalog repository (server side).

use fashion_cube_core::Product;

use super::RepositoryError;
use crate::storage::{self, KeyValueStore, keys};

/// Repository for the product list under `products`.
pub struct ProductRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All stored products, or `None` if the catalog was never seeded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn all(&self) -> Result<Option<Vec<Product>>, RepositoryError> {
        Ok(storage::get_json(self.store, keys::PRODUCTS)?)
    }

    /// Replace the stored catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn replace_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        storage::set_json(self.store, keys::PRODUCTS, &products)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::generator::generate_seeded;
    use crate::storage::MemoryStore;

    #[test]
    fn test_unseeded_then_seeded() {
        let store = MemoryStore::new();
        let products = ProductRepository::new(&store);
        assert!(products.all().unwrap().is_none());

        let generated = generate_seeded(12, 7);
        products.replace_all(&generated).unwrap();
        assert_eq!(products.all().unwrap(), Some(generated));
    }
}
