//! Request and response bodies of the storefront REST API.
//!
//! Shared by the HTTP client and the server routes so both ends agree on
//! field names.

use std::fmt;

use serde::{Deserialize, Serialize};

use fashion_cube_core::{Cart, Department, Product, ProductId, QuantityChange, UserId, UserToken};

/// Login credentials as nested by the login form.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `POST /users/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub credential: Credential,
}

/// `POST /users/login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_token: UserToken,
}

/// `POST /users/signin` body.
#[derive(Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "verifyPassword")]
    pub verify_password: String,
}

impl fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninRequest")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("verify_password", &"[REDACTED]")
            .finish()
    }
}

/// Generic `{ "message": ... }` body used for acknowledgements and errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /users/{id}/cart` body.
///
/// Without `increase`/`decrease` the product is added (or its line
/// incremented); with either flag the existing line is stepped by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "is_false")]
    pub increase: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub decrease: bool,
}

impl CartUpdateRequest {
    /// Add one unit of `product_id` to `user_id`'s cart.
    #[must_use]
    pub const fn add(user_id: UserId, product_id: ProductId) -> Self {
        Self {
            user_id: Some(user_id),
            product_id,
            increase: false,
            decrease: false,
        }
    }

    /// Step an existing line of `user_id`'s cart by one.
    #[must_use]
    pub fn step(user_id: UserId, product_id: ProductId, change: QuantityChange) -> Self {
        Self {
            user_id: Some(user_id),
            product_id,
            increase: change == QuantityChange::Increase,
            decrease: change == QuantityChange::Decrease,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Cart response for both cart endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub cart: Cart,
}

/// `GET /products` and `GET /search` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /products/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// `GET /departments` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<Department>,
}

/// `GET /products` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// `GET /search` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}
