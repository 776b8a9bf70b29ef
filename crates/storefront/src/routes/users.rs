//! Login and registration routes.

use axum::{Json, extract::State};
use tracing::instrument;

use fashion_cube_core::{Email, UserToken};

use crate::api::types::{LoginRequest, LoginResponse, MessageResponse, SigninRequest};
use crate::error::Result;
use crate::services::auth::{
    AuthError, REGISTERED_MESSAGE, UserDirectory, generate_token, require,
};
use crate::state::AppState;

/// `POST /users/login` - issue a session token.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(LoginRequest { credential }): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = Email::parse(&credential.email).map_err(AuthError::from)?;
    require("password", &credential.password)?;

    let user = UserDirectory::new(state.store()).authenticate(&email, &credential.password)?;

    let token = generate_token();
    let user_token = UserToken::new(user.id, user.fullname, token.clone())
        .with_lifetime(state.config().session_ttl);
    state.sessions().insert(token, user_token.clone()).await;

    tracing::info!(user_id = %user_token.user_id, "User logged in");

    Ok(Json(LoginResponse { user_token }))
}

/// `POST /users/signin` - register an account.
#[instrument(skip_all)]
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<Json<MessageResponse>> {
    if body.password != body.verify_password {
        return Err(AuthError::PasswordMismatch.into());
    }

    let fullname = body.fullname.trim();
    require("name", fullname)?;
    let email = Email::parse(&body.email).map_err(AuthError::from)?;
    require("password", &body.password)?;

    let user = UserDirectory::new(state.store()).enroll(fullname, &email, &body.password)?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(Json(MessageResponse {
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::routes::testing::{TestApp, signin_body};

    #[tokio::test]
    async fn test_signin_then_login() {
        let app = TestApp::new();

        let (status, body) = app
            .post("/users/signin", None, signin_body("Ada@Example.com", "engine"))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], REGISTERED_MESSAGE);

        let (status, body) = app
            .post(
                "/users/login",
                None,
                json!({ "credential": { "email": "ada@example.com", "password": "engine" } }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token: UserToken = serde_json::from_value(body["user_token"].clone()).unwrap();
        assert_eq!(token.user_name, "Ada Lovelace");
        assert_eq!(token.expire_in, "7d");
        assert_eq!(
            app.state.sessions().get(&token.token).await.unwrap(),
            token
        );
    }

    #[tokio::test]
    async fn test_login_tags_configured_lifetime() {
        let app = TestApp::with_config(StorefrontConfig {
            session_ttl: Duration::from_secs(12 * 3600),
            ..TestApp::config()
        });
        app.post("/users/signin", None, signin_body("ada@example.com", "engine"))
            .await;

        let (status, body) = app
            .post(
                "/users/login",
                None,
                json!({ "credential": { "email": "ada@example.com", "password": "engine" } }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_token"]["expire_in"], "12h");
    }

    #[tokio::test]
    async fn test_signin_rejections() {
        let app = TestApp::new();
        app.post("/users/signin", None, signin_body("ada@example.com", "engine"))
            .await;

        let (status, body) = app
            .post("/users/signin", None, signin_body("ada@example.com", "other"))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("already exists"));

        let mut mismatch = signin_body("grace@example.com", "cobol");
        mismatch["verifyPassword"] = Value::from("fortran");
        let (status, _) = app.post("/users/signin", None, mismatch).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post("/users/signin", None, signin_body("not-an-email", "x"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let app = TestApp::new();
        app.post("/users/signin", None, signin_body("ada@example.com", "engine"))
            .await;

        let login = |email: &str, password: &str| {
            json!({ "credential": { "email": email, "password": password } })
        };

        let (status, body) = app
            .post("/users/login", None, login("ada@example.com", "wrong"))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, _) = app
            .post("/users/login", None, login("alan@example.com", "engine"))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .post("/users/login", None, login("ada@example.com", ""))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
