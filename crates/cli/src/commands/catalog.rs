//! Catalog commands: list, search, show and departments.

use tracing::info;

use fashion_cube_core::{Product, ProductId};
use fashion_cube_storefront::api::types::ProductQuery;
use fashion_cube_storefront::services::CatalogService;

use super::{CliError, origin_note};

/// One-line product summary.
pub fn summary(product: &Product) -> String {
    let price = match product.discounted_price {
        Some(discounted) if discounted != product.price => {
            format!("{discounted} (was {})", product.price)
        }
        _ => product.price.to_string(),
    };
    format!(
        "#{:<5} {} {} [{}] {}",
        product.id,
        product.emoji,
        product.title,
        product.department_name(),
        price
    )
}

/// List products, optionally filtered.
pub async fn list(
    catalog: &CatalogService,
    category: Option<String>,
    subcategory: Option<String>,
    limit: usize,
) {
    let outcome = catalog
        .products(&ProductQuery {
            category,
            subcategory,
        })
        .await;

    info!(
        "{} products{}",
        outcome.value.len(),
        origin_note(outcome.origin)
    );
    for product in outcome.value.iter().take(limit) {
        info!("{}", summary(product));
    }
}

/// Free-text search.
pub async fn search(catalog: &CatalogService, query: &str, limit: usize) {
    let outcome = catalog.search(query).await;

    info!(
        "{} matches for '{query}'{}",
        outcome.value.len(),
        origin_note(outcome.origin)
    );
    for product in outcome.value.iter().take(limit) {
        info!("{}", summary(product));
    }
}

/// Show one product in full.
///
/// # Errors
///
/// Returns `CliError::Catalog` if the product does not exist.
pub async fn show(catalog: &CatalogService, id: &str) -> Result<(), CliError> {
    let outcome = catalog.product(&ProductId::new(id)).await?;
    let product = &outcome.value;

    info!("{}{}", summary(product), origin_note(outcome.origin));
    info!("  {}", product.description);
    info!(
        "  color: {}  sizes: {}  in stock: {}",
        product.color,
        product.sizes().collect::<Vec<_>>().join(" "),
        product.quantity
    );
    Ok(())
}

/// List the departments and their categories.
pub async fn departments(catalog: &CatalogService) {
    let outcome = catalog.departments().await;
    info!("{} departments{}", outcome.value.len(), origin_note(outcome.origin));
    for department in &outcome.value {
        info!(
            "{}: {}",
            department.name,
            department.category_list().collect::<Vec<_>>().join(", ")
        );
    }
}
