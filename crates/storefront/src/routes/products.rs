//! Catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use fashion_cube_core::ProductId;

use crate::api::types::{
    DepartmentsResponse, ProductQuery, ProductResponse, ProductsResponse, SearchQuery,
};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /products?category&subcategory`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductsResponse> {
    let products = state
        .catalog()
        .filter(query.category.as_deref(), query.subcategory.as_deref());
    Json(ProductsResponse { products })
}

/// `GET /products/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(ProductResponse { product }))
}

/// `GET /departments`
pub async fn departments(State(state): State<AppState>) -> Json<DepartmentsResponse> {
    Json(DepartmentsResponse {
        departments: state.catalog().departments(),
    })
}

/// `GET /search?query`
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(SearchQuery { query }): Query<SearchQuery>,
) -> Json<ProductsResponse> {
    Json(ProductsResponse {
        products: state.catalog().search(&query),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use fashion_cube_core::{Department, Product};

    use crate::routes::testing::{CATALOG_SIZE, TestApp};

    fn products(body: &serde_json::Value) -> Vec<Product> {
        serde_json::from_value(body["products"].clone()).unwrap()
    }

    #[tokio::test]
    async fn test_list_and_filter() {
        let app = TestApp::new();

        let (status, body) = app.get("/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(products(&body).len(), CATALOG_SIZE);

        let (_, body) = app.get("/products?category=All", None).await;
        assert_eq!(products(&body).len(), CATALOG_SIZE);

        let (_, body) = app.get("/products?category=Shoes", None).await;
        let shoes = products(&body);
        assert!(!shoes.is_empty());
        assert!(shoes.iter().all(|p| p.in_category("shoes")));

        let (_, body) = app.get("/products?category=nowhere", None).await;
        assert!(products(&body).is_empty());
    }

    #[tokio::test]
    async fn test_show_product() {
        let app = TestApp::new();

        let (status, body) = app.get("/products/4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["_id"], "4");

        let (status, body) = app.get("/products/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product 9999 not found");
    }

    #[tokio::test]
    async fn test_departments_and_search() {
        let app = TestApp::new();

        let (_, body) = app.get("/departments", None).await;
        let departments: Vec<Department> =
            serde_json::from_value(body["departments"].clone()).unwrap();
        let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Men", "Women", "Shoes", "Accessories"]);

        let (status, body) = app.get("/search?query=JEANS", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(products(&body).iter().all(|p| p.matches_query("jeans")));
    }
}
