//! Client bridges talking to a live API server.
//!
//! Accepted requests come from the server (`Origin::Remote`). A request the
//! server rejects falls back to the client's local store exactly once, and
//! the local answer (or error) is what the caller sees.

use std::sync::Arc;

use fashion_cube_core::{ProductId, UserId};
use fashion_cube_integration_tests::{
    Bridges, SERVER_CATALOG_SIZE, TestServer, secret,
};
use fashion_cube_storefront::api::types::ProductQuery;
use fashion_cube_storefront::db::carts::CartRepository;
use fashion_cube_storefront::services::auth::REGISTERED_MESSAGE;
use fashion_cube_storefront::services::{AuthError, CartError, CatalogError, Origin};
use fashion_cube_storefront::storage::{KeyValueStore, MemoryStore, keys};

fn client(server: &TestServer) -> Bridges {
    Bridges::new(&server.base_url, Arc::new(MemoryStore::new()))
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_and_login_remotely() {
    let server = TestServer::spawn().await;
    let bridges = client(&server);

    let registered = bridges
        .auth
        .register("Ada Lovelace", "ada@example.com", &secret("engine"), &secret("engine"))
        .await
        .unwrap();
    assert_eq!(registered.origin, Origin::Remote);
    assert_eq!(registered.value, REGISTERED_MESSAGE);

    let session = bridges
        .auth
        .login("ada@example.com", &secret("engine"))
        .await
        .unwrap();
    assert_eq!(session.origin, Origin::Remote);
    assert!(!session.value.token.starts_with("local_"));
    assert_eq!(bridges.auth.current_session().unwrap(), Some(session.value.clone()));

    // The user lives on the server, not in the client's store.
    assert!(bridges.store.get(keys::USERS).unwrap().is_none());
    assert!(server.state.store().get(keys::USERS).unwrap().is_some());
}

#[tokio::test]
async fn test_remote_rejections_fall_back_to_local_directory() {
    let server = TestServer::spawn().await;
    let bridges = client(&server);
    bridges
        .auth
        .register("Ada", "ada@example.com", &secret("engine"), &secret("engine"))
        .await
        .unwrap();

    // 409 from the server; the local directory has no Ada yet.
    let duplicate = bridges
        .auth
        .register("Ada", "ada@example.com", &secret("x"), &secret("x"))
        .await
        .unwrap();
    assert_eq!(duplicate.origin, Origin::Local);
    assert!(bridges.store.get(keys::USERS).unwrap().is_some());

    // 401 from the server; locally Ada's password is "x".
    assert!(matches!(
        bridges.auth.login("ada@example.com", &secret("wrong")).await,
        Err(AuthError::InvalidCredential)
    ));
    // 404 from the server and unknown locally.
    assert!(matches!(
        bridges.auth.login("nobody@example.com", &secret("engine")).await,
        Err(AuthError::NotFound)
    ));
    assert!(bridges.auth.current_session().unwrap().is_none());

    let local = bridges
        .auth
        .login("ada@example.com", &secret("x"))
        .await
        .unwrap();
    assert_eq!(local.origin, Origin::Local);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_round_trip() {
    let server = TestServer::spawn().await;
    let bridges = client(&server);
    bridges
        .auth
        .register("Ada", "ada@example.com", &secret("engine"), &secret("engine"))
        .await
        .unwrap();
    let session = bridges
        .auth
        .login("ada@example.com", &secret("engine"))
        .await
        .unwrap()
        .value;
    let id = ProductId::new("5");

    let empty = bridges.carts.get_cart(&session).await.unwrap();
    assert_eq!(empty.origin, Origin::Remote);
    assert!(empty.value.is_empty());

    bridges.carts.add_item(&session, &id).await.unwrap();
    bridges.carts.add_item(&session, &id).await.unwrap();
    let cart = bridges.carts.increase(&session, &id).await.unwrap();
    assert_eq!(cart.origin, Origin::Remote);

    let line = cart.value.line(&id).unwrap();
    assert_eq!(line.qty, 3);
    assert_eq!(cart.value.total_qty(), 3);
    assert_eq!(cart.value.total_price(), line.item.unit_price().times(3));

    // Persisted server-side under the user's id; not mirrored locally.
    let stored = CartRepository::new(server.state.store())
        .get(&session.user_id)
        .unwrap();
    assert_eq!(stored, cart.value);
    assert!(bridges
        .store
        .get(&keys::cart(&session.user_id))
        .unwrap()
        .is_none());

    let cart = bridges.carts.decrease(&session, &id).await.unwrap();
    assert_eq!(cart.value.total_qty(), 2);
}

#[tokio::test]
async fn test_cart_rejections_fall_back() {
    let server = TestServer::spawn().await;
    let bridges = client(&server);
    bridges
        .auth
        .register("Ada", "ada@example.com", &secret("engine"), &secret("engine"))
        .await
        .unwrap();
    let session = bridges
        .auth
        .login("ada@example.com", &secret("engine"))
        .await
        .unwrap()
        .value;

    assert!(matches!(
        bridges
            .carts
            .add_item(&session, &ProductId::new("9999"))
            .await,
        Err(CartError::ProductNotFound(_))
    ));

    // The server rejects a forged token; the change lands in the local cart.
    let mut forged = session.clone();
    forged.token = "forged".to_string();
    let id = ProductId::new("5");
    let cart = bridges.carts.add_item(&forged, &id).await.unwrap();
    assert_eq!(cart.origin, Origin::Local);
    assert_eq!(cart.value.total_qty(), 1);
    assert!(CartRepository::new(server.state.store())
        .get(&session.user_id)
        .unwrap()
        .is_empty());

    let mut other_user = session;
    other_user.user_id = UserId::new("user_other");
    let cart = bridges.carts.get_cart(&other_user).await.unwrap();
    assert_eq!(cart.origin, Origin::Local);
    assert!(cart.value.is_empty());
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_from_server() {
    let server = TestServer::spawn().await;
    let bridges = client(&server);

    let all = bridges.catalog.products(&ProductQuery::default()).await;
    assert_eq!(all.origin, Origin::Remote);
    assert_eq!(all.value.as_slice(), server.state.catalog().products());
    assert_eq!(all.value.len(), SERVER_CATALOG_SIZE);

    let women = bridges
        .catalog
        .products(&ProductQuery {
            category: Some("women".to_string()),
            subcategory: None,
        })
        .await;
    assert!(women.value.iter().all(|p| p.department_name() == "Women"));

    let product = bridges.catalog.product(&ProductId::new("1")).await.unwrap();
    assert_eq!(product.origin, Origin::Remote);
    assert_eq!(Some(&product.value), all.value.first());

    assert!(matches!(
        bridges.catalog.product(&ProductId::new("9999")).await,
        Err(CatalogError::NotFound(_))
    ));

    let departments = bridges.catalog.departments().await;
    assert_eq!(departments.value.len(), 4);

    let hits = bridges.catalog.search("sneakers").await;
    assert_eq!(hits.origin, Origin::Remote);
    assert!(hits.value.iter().all(|p| p.matches_query("sneakers")));
}
