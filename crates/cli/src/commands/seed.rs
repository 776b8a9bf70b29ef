//! Seed a storefront data file with a generated catalog.
//!
//! # Usage
//!
//! ```bash
//! # 100 random products into the default data file
//! fc-cli seed
//!
//! # Reproducible catalog
//! fc-cli seed --count 250 --seed 42 --data-path data/storefront.json
//! ```

use std::path::Path;

use tracing::info;

use fashion_cube_storefront::catalog::generator::generate_maybe_seeded;
use fashion_cube_storefront::db::products::ProductRepository;
use fashion_cube_storefront::storage::FileStore;

use super::CliError;

/// Replace the catalog in the data file at `data_path`.
///
/// Users and carts already in the file are kept.
///
/// # Errors
///
/// Returns `CliError` if the data file cannot be opened or written.
pub fn catalog(data_path: &Path, count: usize, seed: Option<u64>) -> Result<usize, CliError> {
    let store = FileStore::open(data_path)?;
    let products = generate_maybe_seeded(count, seed);

    ProductRepository::new(&store).replace_all(&products)?;

    info!(
        path = %data_path.display(),
        products = products.len(),
        seed = ?seed,
        "Catalog seeded"
    );

    Ok(products.len())
}
