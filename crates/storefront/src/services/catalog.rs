//! Catalog bridge.
//!
//! Lists, searches and looks up products through the storefront API, caching
//! successful remote answers for 5 minutes (`moka`). When a remote call fails
//! the same queries run against a generated [`Catalog`]; single-product
//! lookups also consult products the API already returned.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use fashion_cube_core::{Department, Product, ProductId};

use super::{Outcome, remote_or_else, remote_or_local};
use crate::api::types::ProductQuery;
use crate::api::RemoteApi;
use crate::catalog::Catalog;

/// Maximum number of cached responses.
const CACHE_CAPACITY: u64 = 1000;

/// How long a remote answer is reused.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with this ID.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Cached remote responses.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
    Departments(Arc<Vec<Department>>),
}

/// Catalog bridge.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    api: Arc<dyn RemoteApi>,
    fallback: Catalog,
    cache: Cache<String, CacheValue>,
}

impl CatalogService {
    /// Create a bridge over `api`, answering from `fallback` when it is down.
    #[must_use]
    pub fn new(api: Arc<dyn RemoteApi>, fallback: Catalog) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogServiceInner {
                api,
                fallback,
                cache,
            }),
        }
    }

    /// The generated catalog used when the API cannot answer.
    #[must_use]
    pub fn fallback(&self) -> &Catalog {
        &self.inner.fallback
    }

    /// Look a product up without calling the API: first among cached remote
    /// answers, then in the fallback catalog.
    #[must_use]
    pub fn lookup_offline(&self, id: &ProductId) -> Option<Product> {
        self.cached_product(id)
            .or_else(|| self.inner.fallback.find(id).cloned())
    }

    fn cached_product(&self, id: &ProductId) -> Option<Product> {
        self.inner
            .cache
            .iter()
            .find_map(|(_, value)| match value {
                CacheValue::Product(product) if product.id == *id => Some(*product),
                CacheValue::Products(products) => products.iter().find(|p| p.id == *id).cloned(),
                CacheValue::Product(_) | CacheValue::Departments(_) => None,
            })
    }

    /// Products filtered by category and subcategory.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Outcome<Vec<Product>> {
        let cache_key = format!(
            "products:{}:{}",
            query.category.as_deref().unwrap_or(""),
            query.subcategory.as_deref().unwrap_or("")
        );

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Outcome::remote(products.as_ref().clone());
        }

        let outcome = remote_or_else("products", self.inner.api.products(query), || {
            self.inner
                .fallback
                .filter(query.category.as_deref(), query.subcategory.as_deref())
        })
        .await;

        if !outcome.is_local() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(Arc::new(outcome.value.clone())))
                .await;
        }

        outcome
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Outcome<Product>, CatalogError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Outcome::remote(*product));
        }

        let outcome = remote_or_local("product", self.inner.api.product(id), || {
            self.lookup_offline(id)
                .ok_or_else(|| CatalogError::NotFound(id.clone()))
        })
        .await?;

        if !outcome.is_local() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Product(Box::new(outcome.value.clone())))
                .await;
        }

        Ok(outcome)
    }

    /// The storefront departments.
    #[instrument(skip(self))]
    pub async fn departments(&self) -> Outcome<Vec<Department>> {
        let cache_key = "departments".to_owned();

        if let Some(CacheValue::Departments(departments)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for departments");
            return Outcome::remote(departments.as_ref().clone());
        }

        let outcome = remote_or_else("departments", self.inner.api.departments(), || {
            self.inner.fallback.departments()
        })
        .await;

        if !outcome.is_local() {
            self.inner
                .cache
                .insert(
                    cache_key,
                    CacheValue::Departments(Arc::new(outcome.value.clone())),
                )
                .await;
        }

        outcome
    }

    /// Free-text product search. Not cached.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Outcome<Vec<Product>> {
        remote_or_else("search", self.inner.api.search(query), || {
            self.inner.fallback.search(query)
        })
        .await
    }

    /// Drop all cached remote answers.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
