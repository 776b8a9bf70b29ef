//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;

use fashion_cube_core::UserToken;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::storage::KeyValueStore;

/// Maximum number of live session tokens.
const SESSION_CAPACITY: u64 = 10_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// store, the served catalog and the issued session tokens.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn KeyValueStore>,
    catalog: Catalog,
    sessions: Cache<String, UserToken>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is read from the store; if the store was never seeded a
    /// catalog of `config.catalog_size` products is generated and saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog cannot be read or saved.
    pub fn new(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, RepositoryError> {
        let products = ProductRepository::new(store.as_ref());
        let catalog = if let Some(stored) = products.all()? {
            tracing::info!(products = stored.len(), "Catalog loaded from store");
            Catalog::new(stored)
        } else {
            let generated = Catalog::generated(config.catalog_size, config.catalog_seed);
            products.replace_all(generated.products())?;
            tracing::info!(
                products = generated.len(),
                seed = ?config.catalog_seed,
                "Store had no catalog, generated one"
            );
            generated
        };

        let sessions = Cache::builder()
            .max_capacity(SESSION_CAPACITY)
            .time_to_live(config.session_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
                sessions,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the served catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the issued session tokens, keyed by token.
    #[must_use]
    pub fn sessions(&self) -> &Cache<String, UserToken> {
        &self.inner.sessions
    }
}
