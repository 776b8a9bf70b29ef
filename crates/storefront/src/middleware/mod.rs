//! HTTP middleware stack for the API server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (only when an origin is configured)

pub mod auth;
pub mod request_id;

pub use auth::RequireSession;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
