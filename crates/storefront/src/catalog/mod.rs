//! Product catalog: generation and queries.
//!
//! A [`Catalog`] is an immutable product list with the storefront's
//! category/subcategory filter, free-text search and lookup by ID. The API
//! server serves one built from the seeded store; the client keeps a
//! generated one as its offline fallback.

pub mod generator;

use std::sync::Arc;

use fashion_cube_core::{Department, Product, ProductId};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// An immutable, cheaply clonable product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Wrap a product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// A freshly generated catalog of `size` products.
    #[must_use]
    pub fn generated(size: usize, seed: Option<u64>) -> Self {
        Self::new(generator::generate_maybe_seeded(size, seed))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in `category`, optionally narrowed by `subcategory`.
    ///
    /// See [`filter_products`].
    #[must_use]
    pub fn filter(&self, category: Option<&str>, subcategory: Option<&str>) -> Vec<Product> {
        filter_products(self.products.iter(), category, subcategory)
    }

    /// Products matching a free-text query.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Product> {
        search_products(self.products.iter(), query)
    }

    /// The product with `id`, if present.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// The storefront departments.
    #[must_use]
    pub fn departments(&self) -> Vec<Department> {
        generator::departments()
    }
}

/// Filter products the way category pages do.
///
/// A missing, empty or `"All"` category keeps everything; otherwise a product
/// is kept when its category or department equals `category`
/// (case-insensitive). A non-empty `subcategory` then keeps only products
/// whose title contains it, case-insensitively.
pub fn filter_products<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Vec<Product> {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));
    let subcategory = subcategory.map(str::trim).filter(|s| !s.is_empty());

    products
        .into_iter()
        .filter(|product| category.is_none_or(|c| product.in_category(c)))
        .filter(|product| subcategory.is_none_or(|s| product.title_contains(s)))
        .cloned()
        .collect()
}

/// Case-insensitive search over title, description, category and department.
///
/// An empty query matches everything.
pub fn search_products<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    query: &str,
) -> Vec<Product> {
    let query = query.trim();
    products
        .into_iter()
        .filter(|product| product.matches_query(query))
        .cloned()
        .collect()
}
