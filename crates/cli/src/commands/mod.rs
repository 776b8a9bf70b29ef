//! Command implementations.
//!
//! Account, cart and catalog commands go through the same bridges an app
//! would use, so they keep working (against the local store) while the
//! storefront API is down.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod seed;

use std::sync::Arc;

use thiserror::Error;

use fashion_cube_storefront::api::{ApiError, HttpApiClient, RemoteApi};
use fashion_cube_storefront::catalog::Catalog;
use fashion_cube_storefront::config::{ClientConfig, ConfigError};
use fashion_cube_storefront::db::RepositoryError;
use fashion_cube_storefront::services::{
    AuthError, AuthService, CartError, CartService, CatalogError, CatalogService, Origin,
};
use fashion_cube_storefront::storage::{FileStore, KeyValueStore, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    #[error("Local store error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Cart(#[from] CartError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("Not logged in. Run `fc-cli account login` first")]
    NotLoggedIn,
}

/// The client bridges over the configured API and local store.
pub struct Bridges {
    pub auth: AuthService,
    pub carts: CartService,
    pub catalog: CatalogService,
}

impl Bridges {
    /// Build the bridges from `FASHION_CUBE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the configuration is invalid or the local store
    /// cannot be opened.
    pub fn from_env() -> Result<Self, CliError> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Build the bridges from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the HTTP client cannot be built or the local
    /// store cannot be opened.
    pub fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let api: Arc<dyn RemoteApi> =
            Arc::new(HttpApiClient::new(&config.api_url, config.api_timeout)?);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(config.local_store.clone())?);
        let fallback = Catalog::generated(config.catalog_size, config.catalog_seed);

        tracing::debug!(
            api_url = %config.api_url,
            local_store = %config.local_store.display(),
            "Bridges ready"
        );

        let catalog = CatalogService::new(api.clone(), fallback);
        Ok(Self {
            auth: AuthService::new(api.clone(), store.clone()),
            carts: CartService::new(api, store, catalog.clone()),
            catalog,
        })
    }
}

/// Suffix marking results served by the local fallback.
fn origin_note(origin: Origin) -> &'static str {
    match origin {
        Origin::Remote => "",
        Origin::Local => " (offline)",
    }
}
