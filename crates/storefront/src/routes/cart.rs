//! Per-user cart routes.
//!
//! Both endpoints require the session token of the cart's owner.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use fashion_cube_core::{Product, ProductId, QuantityChange, UserId};

use crate::api::types::{CartResponse, CartUpdateRequest};
use crate::db::carts::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireSession;
use crate::state::AppState;

/// `GET /users/{id}/cart` - the user's cart, empty if they have none.
#[instrument(skip(session, state))]
pub async fn show(
    session: RequireSession,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let user_id = UserId::new(user_id);
    session.authorize(&user_id)?;

    let cart = CartRepository::new(state.store()).get(&user_id)?;
    Ok(Json(CartResponse { cart }))
}

/// `POST /users/{id}/cart` - add a product or step a line's quantity.
#[instrument(skip(session, state, update), fields(product_id = %update.product_id))]
pub async fn update(
    session: RequireSession,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<CartUpdateRequest>,
) -> Result<Json<CartResponse>> {
    let user_id = UserId::new(user_id);
    session.authorize(&user_id)?;

    if update.user_id.as_ref().is_some_and(|id| id != &user_id) {
        return Err(AppError::BadRequest(
            "userId does not match the cart owner".to_string(),
        ));
    }

    let change = match (update.increase, update.decrease) {
        (false, false) => None,
        (true, false) => Some(QuantityChange::Increase),
        (false, true) => Some(QuantityChange::Decrease),
        (true, true) => {
            return Err(AppError::BadRequest(
                "increase and decrease are mutually exclusive".to_string(),
            ));
        }
    };

    let carts = CartRepository::new(state.store());
    let cart = match change {
        None => {
            let product = find_product(&state, &update.product_id)?;
            carts.modify(&user_id, |cart| cart.add_item(&product))?.0
        }
        Some(change) => {
            let (cart, applied) =
                carts.modify(&user_id, |cart| cart.apply(&update.product_id, change))?;
            if !applied {
                tracing::debug!("Product not in cart, nothing to change");
            }
            cart
        }
    };

    tracing::info!(
        user_id = %user_id,
        total_qty = cart.total_qty(),
        total_price = %cart.total_price(),
        "Cart updated"
    );

    Ok(Json(CartResponse { cart }))
}

fn find_product(state: &AppState, id: &ProductId) -> Result<Product> {
    state
        .catalog()
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use fashion_cube_core::{Cart, Price};

    use crate::routes::testing::TestApp;

    fn cart(body: &serde_json::Value) -> Cart {
        serde_json::from_value(body["cart"].clone()).unwrap()
    }

    #[tokio::test]
    async fn test_add_increase_decrease() {
        let app = TestApp::new();
        let session = app.logged_in("ada@example.com").await;
        let path = format!("/users/{}/cart", session.user_id);

        let (status, body) = app.get(&path, Some(&session.token)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(cart(&body).is_empty());

        app.post(&path, Some(&session.token), json!({ "productId": 3 }))
            .await;
        let (status, body) = app
            .post(&path, Some(&session.token), json!({ "productId": "3" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        let added = cart(&body);
        let line = added.items().values().next().unwrap();
        assert_eq!(line.qty, 2);
        assert_eq!(added.total_price(), line.item.unit_price().times(2));

        let (_, body) = app
            .post(
                &path,
                Some(&session.token),
                json!({ "productId": "3", "increase": true }),
            )
            .await;
        assert_eq!(cart(&body).total_qty(), 3);

        for _ in 0..3 {
            app.post(
                &path,
                Some(&session.token),
                json!({ "productId": "3", "decrease": true }),
            )
            .await;
        }
        let (_, body) = app.get(&path, Some(&session.token)).await;
        let emptied = cart(&body);
        assert!(emptied.is_empty());
        assert_eq!(emptied.total_price(), Price::ZERO);
    }

    #[tokio::test]
    async fn test_token_required_and_scoped() {
        let app = TestApp::new();
        let ada = app.logged_in("ada@example.com").await;
        let grace = app.logged_in("grace@example.com").await;
        let path = format!("/users/{}/cart", ada.user_id);

        let (status, _) = app.get(&path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get(&path, Some("forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get(&path, Some(&grace.token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_bad_updates() {
        let app = TestApp::new();
        let session = app.logged_in("ada@example.com").await;
        let path = format!("/users/{}/cart", session.user_id);

        let (status, _) = app
            .post(&path, Some(&session.token), json!({ "productId": "9999" }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .post(
                &path,
                Some(&session.token),
                json!({ "productId": "1", "increase": true, "decrease": true }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post(
                &path,
                Some(&session.token),
                json!({ "userId": "someone_else", "productId": "1" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
