//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Users
//! POST /users/login            - Issue a session token
//! POST /users/signin           - Register an account
//!
//! # Cart (requires the owner's token in `authorization`)
//! GET  /users/{id}/cart        - Current cart
//! POST /users/{id}/cart        - Add a product or step a line's quantity
//!
//! # Catalog
//! GET  /products               - Product listing (?category&subcategory)
//! GET  /products/{id}          - Product detail
//! GET  /departments            - Department list
//! GET  /search                 - Free-text search (?query)
//! ```

pub mod cart;
pub mod products;
pub mod users;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(users::login))
        .route("/signin", post(users::signin))
        .route("/{id}/cart", get(cart::show).post(cart::update))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/users", user_routes())
        .nest("/products", product_routes())
        .route("/departments", get(products::departments))
        .route("/search", get(products::search))
}

/// The full application: routes, request tracing and optional CORS.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let cors = state.config().cors_origin.as_deref().and_then(|origin| {
        HeaderValue::from_str(origin).map_or_else(
            |_| {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            },
            |origin| {
                Some(
                    CorsLayer::new()
                        .allow_origin(origin)
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
            },
        )
    });

    let router = routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        );

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use super::testing::TestApp;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = TestApp::new().get("/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = TestApp::new().get("/checkout", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
