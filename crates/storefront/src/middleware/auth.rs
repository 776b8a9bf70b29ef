//! Authentication extractors.
//!
//! Session tokens travel raw in the `authorization` header and are resolved
//! against the tokens issued by `POST /users/login`.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use fashion_cube_core::{UserId, UserToken};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Extractor that requires a valid session token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(session): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", session.user_name)
/// }
/// ```
pub struct RequireSession(pub UserToken);

impl RequireSession {
    /// Check that the session belongs to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for another user's resource.
    pub fn authorize(&self, user_id: &UserId) -> Result<(), AppError> {
        if &self.0.user_id == user_id {
            Ok(())
        } else {
            tracing::warn!(
                session_user = %self.0.user_id,
                requested_user = %user_id,
                "Session token used for another user"
            );
            Err(AppError::Forbidden("Not allowed to access this cart".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

        let session = state
            .sessions()
            .get(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        set_sentry_user(&session.user_id);

        Ok(Self(session))
    }
}
