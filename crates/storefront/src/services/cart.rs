//! Cart bridge.
//!
//! Reads and mutations go to the storefront API for the session's user. When
//! the remote call fails they apply to the cart persisted locally under
//! `cart_{user_id}`; products added offline are resolved through the catalog
//! bridge (products it already fetched, then its generated fallback).

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use fashion_cube_core::{Cart, InventoryCheck, Price, ProductId, QuantityChange, UserToken};

use super::catalog::CatalogService;
use super::{Outcome, remote_or_local};
use crate::api::RemoteApi;
use crate::api::types::CartUpdateRequest;
use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::storage::KeyValueStore;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product to add does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A cart together with a stock check of its lines.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub cart: Cart,
    pub inventory: InventoryCheck,
}

impl CartSummary {
    /// Units across all lines.
    #[must_use]
    pub const fn total_items(&self) -> u32 {
        self.cart.total_qty()
    }

    /// Amount charged for the whole cart.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.cart.total_price()
    }
}

/// Cart bridge.
#[derive(Clone)]
pub struct CartService {
    api: Arc<dyn RemoteApi>,
    store: Arc<dyn KeyValueStore>,
    catalog: CatalogService,
}

impl CartService {
    /// Create a bridge over `api` with `store` as the local fallback.
    #[must_use]
    pub fn new(
        api: Arc<dyn RemoteApi>,
        store: Arc<dyn KeyValueStore>,
        catalog: CatalogService,
    ) -> Self {
        Self {
            api,
            store,
            catalog,
        }
    }

    fn carts(&self) -> CartRepository<'_> {
        CartRepository::new(self.store.as_ref())
    }

    /// The session user's cart (empty if they have none).
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the local cart cannot be read.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn get_cart(&self, session: &UserToken) -> Result<Outcome<Cart>, CartError> {
        remote_or_local("get_cart", self.api.get_cart(session), || {
            Ok(self.carts().get(&session.user_id)?)
        })
        .await
    }

    /// The session user's cart with every line checked against current stock.
    ///
    /// Stock comes from the catalog bridge; a product it cannot find counts
    /// as out of stock. The origin is the cart's.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the local cart cannot be read.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn summary(&self, session: &UserToken) -> Result<Outcome<CartSummary>, CartError> {
        let outcome = self.get_cart(session).await?;

        let mut stock = HashMap::new();
        for id in outcome.value.items().keys() {
            if let Ok(product) = self.catalog.product(id).await {
                stock.insert(id.clone(), product.value.quantity);
            }
        }

        Ok(outcome.map(|cart| {
            let inventory = cart.check_inventory(|id| stock.get(id).copied());
            if !inventory.valid {
                tracing::info!(
                    out_of_stock = inventory.out_of_stock.len(),
                    "Cart has lines beyond available stock"
                );
            }
            CartSummary { cart, inventory }
        }))
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product is unknown.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn add_item(
        &self,
        session: &UserToken,
        product_id: &ProductId,
    ) -> Result<Outcome<Cart>, CartError> {
        let update = CartUpdateRequest::add(session.user_id.clone(), product_id.clone());

        let outcome = remote_or_local("add_item", self.api.update_cart(session, &update), || {
            let product = self
                .catalog
                .lookup_offline(product_id)
                .ok_or_else(|| CartError::ProductNotFound(product_id.clone()))?;
            let (cart, ()) = self
                .carts()
                .modify(&session.user_id, |cart| cart.add_item(&product))?;
            Ok::<_, CartError>(cart)
        })
        .await?;

        tracing::info!(
            product_id = %product_id,
            total_qty = outcome.value.total_qty(),
            origin = %outcome.origin,
            "Added item to cart"
        );

        Ok(outcome)
    }

    /// Increase a line's quantity by one. No-op if the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the local cart cannot be written.
    pub async fn increase(
        &self,
        session: &UserToken,
        product_id: &ProductId,
    ) -> Result<Outcome<Cart>, CartError> {
        self.change_quantity(session, product_id, QuantityChange::Increase)
            .await
    }

    /// Decrease a line's quantity by one, removing it at zero. No-op if the
    /// product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the local cart cannot be written.
    pub async fn decrease(
        &self,
        session: &UserToken,
        product_id: &ProductId,
    ) -> Result<Outcome<Cart>, CartError> {
        self.change_quantity(session, product_id, QuantityChange::Decrease)
            .await
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn change_quantity(
        &self,
        session: &UserToken,
        product_id: &ProductId,
        change: QuantityChange,
    ) -> Result<Outcome<Cart>, CartError> {
        let update = CartUpdateRequest::step(session.user_id.clone(), product_id.clone(), change);

        remote_or_local(
            "change_quantity",
            self.api.update_cart(session, &update),
            || {
                let (cart, applied) = self
                    .carts()
                    .modify(&session.user_id, |cart| cart.apply(product_id, change))?;
                if !applied {
                    tracing::debug!(product_id = %product_id, "Product not in cart, nothing to change");
                }
                Ok(cart)
            },
        )
        .await
    }
}
