//! `reqwest` implementation of [`RemoteApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use fashion_cube_core::{Cart, Department, Product, ProductId, UserToken};

use super::types::{
    CartResponse, CartUpdateRequest, Credential, DepartmentsResponse, LoginRequest, LoginResponse,
    MessageResponse, ProductQuery, ProductResponse, ProductsResponse, SigninRequest,
};
use super::{ApiError, RemoteApi};

/// Longest slice of an unexpected body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for the storefront API.
///
/// Every request is bounded by the configured timeout; a timeout surfaces as
/// an unavailable [`ApiError::Http`].
#[derive(Clone)]
pub struct HttpApiClient {
    inner: Arc<HttpApiClientInner>,
}

struct HttpApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client fails to build.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(HttpApiClientInner { client, base_url }),
        })
    }

    /// Root URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn cart_url(&self, session: &UserToken) -> Result<Url, ApiError> {
        self.url(&format!(
            "users/{}/cart",
            urlencoding::encode(session.user_id.as_str())
        ))
    }

    fn authorized(
        request: RequestBuilder,
        session: &UserToken,
    ) -> Result<RequestBuilder, ApiError> {
        let value = HeaderValue::from_str(&session.token).map_err(|_| ApiError::InvalidHeader)?;
        Ok(request.header(AUTHORIZATION, value))
    }

    /// Send a request and decode a JSON success body.
    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&body).map_or_else(
                |_| body.chars().take(BODY_PREVIEW_CHARS).collect(),
                |m| m.message,
            );
            tracing::debug!(
                status = %status,
                message = %message,
                "Storefront API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
                "Failed to parse storefront API response"
            );
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl RemoteApi for HttpApiClient {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &SecretString) -> Result<UserToken, ApiError> {
        let body = LoginRequest {
            credential: Credential {
                email: email.to_owned(),
                password: password.expose_secret().to_owned(),
            },
        };
        let request = self.inner.client.post(self.url("users/login")?).json(&body);
        let response: LoginResponse = Self::execute(request).await?;
        Ok(response.user_token)
    }

    #[instrument(skip(self, password, verify_password))]
    async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &SecretString,
        verify_password: &SecretString,
    ) -> Result<String, ApiError> {
        let body = SigninRequest {
            fullname: fullname.to_owned(),
            email: email.to_owned(),
            password: password.expose_secret().to_owned(),
            verify_password: verify_password.expose_secret().to_owned(),
        };
        let request = self.inner.client.post(self.url("users/signin")?).json(&body);
        let response: MessageResponse = Self::execute(request).await?;
        Ok(response.message)
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn get_cart(&self, session: &UserToken) -> Result<Cart, ApiError> {
        let request = Self::authorized(self.inner.client.get(self.cart_url(session)?), session)?;
        let response: CartResponse = Self::execute(request).await?;
        Ok(response.cart)
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn update_cart(
        &self,
        session: &UserToken,
        update: &CartUpdateRequest,
    ) -> Result<Cart, ApiError> {
        let request = self.inner.client.post(self.cart_url(session)?).json(update);
        let request = Self::authorized(request, session)?;
        let response: CartResponse = Self::execute(request).await?;
        Ok(response.cart)
    }

    #[instrument(skip(self))]
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut url = self.url("products")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(category) = &query.category {
                pairs.append_pair("category", category);
            }
            if let Some(subcategory) = &query.subcategory {
                pairs.append_pair("subcategory", subcategory);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        let response: ProductsResponse = Self::execute(self.inner.client.get(url)).await?;
        Ok(response.products)
    }

    #[instrument(skip(self))]
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let url = self.url(&format!("products/{}", urlencoding::encode(id.as_str())))?;
        let response: ProductResponse = Self::execute(self.inner.client.get(url)).await?;
        Ok(response.product)
    }

    #[instrument(skip(self))]
    async fn departments(&self) -> Result<Vec<Department>, ApiError> {
        let request = self.inner.client.get(self.url("departments")?);
        let response: DepartmentsResponse = Self::execute(request).await?;
        Ok(response.departments)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let mut url = self.url("search")?;
        url.query_pairs_mut().append_pair("query", query);
        let response: ProductsResponse = Self::execute(self.inner.client.get(url)).await?;
        Ok(response.products)
    }
}
