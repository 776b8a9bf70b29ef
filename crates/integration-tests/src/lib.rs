//! Integration tests for Fashion Cube.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fashion-cube-integration-tests
//! ```
//!
//! No external services are needed: each test binds the real API router on
//! an ephemeral loopback port over an in-memory store.
//!
//! # Test Categories
//!
//! - `api_http` - raw HTTP against the server (status codes, bodies, headers)
//! - `remote_bridges` - client bridges talking to a live server
//! - `fallback_bridges` - client bridges with the server unreachable
//!
//! # Example
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_storefront_health() {
//!     let server = TestServer::spawn().await;
//!     let resp = reqwest::get(server.url("health")).await.unwrap();
//!     assert_eq!(resp.status(), 200);
//! }
//! ```

#![allow(clippy::unwrap_used)] // test support: failures should abort the test

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use fashion_cube_storefront::api::{HttpApiClient, RemoteApi};
use fashion_cube_storefront::catalog::Catalog;
use fashion_cube_storefront::config::StorefrontConfig;
use fashion_cube_storefront::routes;
use fashion_cube_storefront::services::{AuthService, CartService, CatalogService};
use fashion_cube_storefront::state::AppState;
use fashion_cube_storefront::storage::{FileStore, KeyValueStore, MemoryStore};

/// Products in the server's seeded catalog.
pub const SERVER_CATALOG_SIZE: usize = 50;

/// Products in the client's offline catalog.
pub const OFFLINE_CATALOG_SIZE: usize = 30;

/// Per-request timeout used by test clients.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Server
// =============================================================================

/// The API server running on a loopback port for the duration of a test.
pub struct TestServer {
    pub base_url: Url,
    pub state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over an in-memory store with a seeded catalog.
    pub async fn spawn() -> Self {
        let config = StorefrontConfig {
            catalog_size: SERVER_CATALOG_SIZE,
            catalog_seed: Some(7),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, Arc::new(MemoryStore::new())).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = routes::app(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            state,
            handle,
        }
    }

    /// Absolute URL for an API path such as `users/login`.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A loopback URL with nothing listening behind it.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

// =============================================================================
// Client
// =============================================================================

/// The three client bridges sharing one API client and one local store.
pub struct Bridges {
    pub auth: AuthService,
    pub carts: CartService,
    pub catalog: CatalogService,
    pub store: Arc<dyn KeyValueStore>,
}

impl Bridges {
    /// Bridges over `api_url` with a file-backed local store at `local_store`.
    #[must_use]
    pub fn with_file_store(api_url: &Url, local_store: &Path) -> Self {
        Self::new(api_url, Arc::new(FileStore::open(local_store).unwrap()))
    }

    /// Bridges over `api_url` with the given local store.
    #[must_use]
    pub fn new(api_url: &Url, store: Arc<dyn KeyValueStore>) -> Self {
        let api: Arc<dyn RemoteApi> = Arc::new(HttpApiClient::new(api_url, CLIENT_TIMEOUT).unwrap());
        let catalog = CatalogService::new(
            api.clone(),
            Catalog::generated(OFFLINE_CATALOG_SIZE, Some(11)),
        );

        Self {
            auth: AuthService::new(api.clone(), store.clone()),
            carts: CartService::new(api, store.clone(), catalog.clone()),
            catalog,
            store,
        }
    }
}

/// Wrap a password for the bridge API.
#[must_use]
pub fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_owned())
}
