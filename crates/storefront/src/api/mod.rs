//! Remote storefront API.
//!
//! The bridges in [`crate::services`] talk to the API through the
//! [`RemoteApi`] trait so tests can substitute an unreachable or rejecting
//! backend. [`HttpApiClient`] is the real implementation.
//!
//! # Failure classes
//!
//! [`ApiError::is_unavailable`] separates "the API could not answer"
//! (connection refused, timeout, 5xx) from "the API answered no" (4xx). Both
//! send a bridge down its local fallback path; the distinction only shows up
//! in the logs.

mod client;
pub mod types;

pub use client::HttpApiClient;

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use fashion_cube_core::{Cart, Department, Product, ProductId, UserToken};

use types::{CartUpdateRequest, ProductQuery};

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived (or while reading it).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a success response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Session token cannot be sent as a header value.
    #[error("invalid authorization header")]
    InvalidHeader,
}

impl ApiError {
    /// Whether the failure means the API could not be reached.
    ///
    /// Transport failures, timeouts and 5xx responses count; client errors
    /// (4xx), malformed responses and local request-building errors do not.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder(),
            Self::Api { status, .. } => *status >= 500,
            Self::Parse(_) | Self::InvalidUrl(_) | Self::InvalidHeader => false,
        }
    }

    /// HTTP status of a rejected request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message of a rejected request, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Operations the storefront API offers.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `POST /users/login`.
    async fn login(&self, email: &str, password: &SecretString) -> Result<UserToken, ApiError>;

    /// `POST /users/signin`. Returns the server's acknowledgement message.
    async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &SecretString,
        verify_password: &SecretString,
    ) -> Result<String, ApiError>;

    /// `GET /users/{id}/cart` for the session's user.
    async fn get_cart(&self, session: &UserToken) -> Result<Cart, ApiError>;

    /// `POST /users/{id}/cart` for the session's user.
    async fn update_cart(
        &self,
        session: &UserToken,
        update: &CartUpdateRequest,
    ) -> Result<Cart, ApiError>;

    /// `GET /products`.
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError>;

    /// `GET /products/{id}`.
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// `GET /departments`.
    async fn departments(&self) -> Result<Vec<Department>, ApiError>;

    /// `GET /search`.
    async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError>;
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailability_classes() {
        let server_error = ApiError::Api {
            status: 502,
            message: String::new(),
        };
        let rejected = ApiError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert!(server_error.is_unavailable());
        assert!(!rejected.is_unavailable());
        assert_eq!(rejected.status(), Some(401));
        assert_eq!(rejected.message(), Some("Invalid credentials"));
        assert!(!ApiError::Parse("bad".to_string()).is_unavailable());
        assert!(!ApiError::InvalidHeader.is_unavailable());
    }
}
