//! Remote-first bridges with a local fallback.
//!
//! # Services
//!
//! - `auth` - login/registration against the API, falling back to the local
//!   user directory
//! - `cart` - cart reads and mutations against the API, falling back to the
//!   locally persisted cart
//! - `catalog` - product listing, lookup and search against the API (cached),
//!   falling back to a generated catalog
//!
//! Every bridge operation makes at most one remote call. If that call fails
//! for any reason, the failure is logged and the operation is re-run exactly
//! once against local state, whose answer (or error) is final. Results carry
//! an [`Origin`] so callers can tell which path answered.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, CatalogService};

use core::convert::Infallible;
use core::fmt;
use std::future::Future;

use serde::Serialize;

use crate::api::ApiError;

/// Which path produced a bridge result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The storefront API answered.
    Remote,
    /// The API call failed; local state answered.
    Local,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// A bridge result tagged with its [`Origin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Outcome<T> {
    /// A result produced by the API.
    pub const fn remote(value: T) -> Self {
        Self {
            value,
            origin: Origin::Remote,
        }
    }

    /// A result produced by the local fallback.
    pub const fn local(value: T) -> Self {
        Self {
            value,
            origin: Origin::Local,
        }
    }

    /// Whether the local fallback produced this result.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }

    /// Transform the value, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            origin: self.origin,
        }
    }

    /// Discard the origin.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Await `remote`; if it fails, log and run `local` instead.
pub(crate) async fn remote_or_local<T, E>(
    operation: &'static str,
    remote: impl Future<Output = Result<T, ApiError>> + Send,
    local: impl FnOnce() -> Result<T, E> + Send,
) -> Result<Outcome<T>, E> {
    match remote.await {
        Ok(value) => Ok(Outcome::remote(value)),
        Err(e) => {
            if e.is_unavailable() {
                tracing::warn!(
                    operation,
                    error = %e,
                    "Storefront API unavailable, using local fallback"
                );
            } else {
                tracing::warn!(
                    operation,
                    status = ?e.status(),
                    error = %e,
                    "Storefront API request failed, using local fallback"
                );
            }
            local().map(Outcome::local)
        }
    }
}

/// [`remote_or_local`] for operations whose local path cannot fail.
pub(crate) async fn remote_or_else<T>(
    operation: &'static str,
    remote: impl Future<Output = Result<T, ApiError>> + Send,
    local: impl FnOnce() -> T + Send,
) -> Outcome<T> {
    match remote_or_local::<T, Infallible>(operation, remote, || Ok(local())).await {
        Ok(outcome) => outcome,
        Err(never) => match never {},
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Local,
    }

    fn rejected(status: u16) -> ApiError {
        ApiError::Api {
            status,
            message: String::new(),
        }
    }

    #[tokio::test]
    async fn test_remote_success_skips_local() {
        let outcome = remote_or_local::<_, TestError>(
            "test",
            async { Ok(1) },
            || panic!("local path must not run"),
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::remote(1));
    }

    #[tokio::test]
    async fn test_unavailable_falls_back_once() {
        let mut calls = 0;
        let outcome = remote_or_local::<_, TestError>("test", async { Err(rejected(503)) }, || {
            calls += 1;
            Ok(2)
        })
        .await
        .unwrap();
        assert_eq!(calls, 1);
        assert!(outcome.is_local());
        assert_eq!(outcome.into_value(), 2);
    }

    #[tokio::test]
    async fn test_rejection_falls_back_too() {
        for error in [rejected(404), rejected(401), ApiError::Parse("bad".to_string())] {
            let outcome =
                remote_or_local::<_, TestError>("test", async move { Err(error) }, || Ok(3))
                    .await
                    .unwrap();
            assert_eq!(outcome, Outcome::local(3));
        }
    }

    #[tokio::test]
    async fn test_local_failure_is_terminal() {
        let result = remote_or_local::<i32, TestError>(
            "test",
            async { Err(rejected(500)) },
            || Err(TestError::Local),
        )
        .await;
        assert_eq!(result, Err(TestError::Local));
    }

    #[test]
    fn test_origin_display_and_map() {
        assert_eq!(Origin::Local.to_string(), "local");
        let outcome = Outcome::remote(2).map(|n| n * 10);
        assert_eq!(outcome.origin, Origin::Remote);
        assert_eq!(outcome.value, 20);
    }
}
