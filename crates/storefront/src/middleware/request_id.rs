//! Request ID middleware for request tracing and correlation.
//!
//! Every API response carries an `x-request-id`. A well-formed ID supplied
//! by the caller (a proxy, or a bridge correlating its own logs) is kept;
//! anything else is replaced by a fresh UUID v4.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied ID that is accepted.
const MAX_REQUEST_ID_LEN: usize = 128;

fn accepted(value: &HeaderValue) -> Option<&str> {
    let id = value.to_str().ok()?;
    let valid = !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    valid.then_some(id)
}

/// Middleware that ensures every request has a request ID.
///
/// The ID is recorded in the current tracing span, set as a Sentry tag,
/// written back onto the request for handlers, and echoed in the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(accepted)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let header = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header {
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn request_id(header: Option<&str>) -> String {
        let mut request = Request::builder().uri("/");
        if let Some(value) = header {
            request = request.header(REQUEST_ID_HEADER, value);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_generates_id_when_absent() {
        let id = request_id(None).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_keeps_well_formed_caller_id() {
        assert_eq!(request_id(Some("cli-42.a_b")).await, "cli-42.a_b");
    }

    #[tokio::test]
    async fn test_replaces_malformed_caller_id() {
        let id = request_id(Some("spaces are not allowed")).await;
        assert!(Uuid::parse_str(&id).is_ok());

        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert_ne!(request_id(Some(&long)).await, long);
    }
}
