//! Cart commands for the logged-in user.

use tracing::info;

use fashion_cube_core::{Cart, InventoryCheck, ProductId};
use fashion_cube_storefront::services::Origin;

use super::account::require_session;
use super::catalog::summary;
use super::{Bridges, CliError, origin_note};

/// A cart change requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Add,
    Increase,
    Decrease,
}

/// Show the cart.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or `CliError::Cart` if
/// the local cart cannot be read.
pub async fn show(bridges: &Bridges) -> Result<(), CliError> {
    let session = require_session(&bridges.auth)?;
    let outcome = bridges.carts.get_cart(&session).await?;
    print_cart(&outcome.value, outcome.origin);
    Ok(())
}

/// Show the cart and flag lines that exceed current stock.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or `CliError::Cart` if
/// the local cart cannot be read.
pub async fn stock_summary(bridges: &Bridges) -> Result<(), CliError> {
    let session = require_session(&bridges.auth)?;
    let outcome = bridges.carts.summary(&session).await?;
    print_cart(&outcome.value.cart, outcome.origin);
    for line in stock_report(&outcome.value.inventory) {
        info!("{line}");
    }
    Ok(())
}

fn stock_report(inventory: &InventoryCheck) -> Vec<String> {
    if inventory.valid {
        return vec!["All items in stock".to_owned()];
    }
    inventory
        .out_of_stock
        .iter()
        .map(|line| {
            format!(
                "Out of stock: #{} ({} requested, {} available)",
                line.product_id, line.requested, line.available
            )
        })
        .collect()
}

/// Apply a change to one product's line, then show the cart.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or `CliError::Cart` if
/// the product is unknown.
pub async fn change(bridges: &Bridges, product_id: &str, change: CartChange) -> Result<(), CliError> {
    let session = require_session(&bridges.auth)?;
    let product_id = ProductId::new(product_id);

    let outcome = match change {
        CartChange::Add => bridges.carts.add_item(&session, &product_id).await?,
        CartChange::Increase => bridges.carts.increase(&session, &product_id).await?,
        CartChange::Decrease => bridges.carts.decrease(&session, &product_id).await?,
    };

    print_cart(&outcome.value, outcome.origin);
    Ok(())
}

fn print_cart(cart: &Cart, origin: Origin) {
    if cart.is_empty() {
        info!("Cart is empty{}", origin_note(origin));
        return;
    }

    for line in cart.items().values() {
        info!("{:>3} x {}  = {}", line.qty, summary(&line.item), line.subtotal());
    }
    info!(
        "{} items, total {}{}",
        cart.total_qty(),
        cart.total_price(),
        origin_note(origin)
    );
}
