//! Authentication bridge.
//!
//! Login and registration go to the storefront API first. When the remote
//! call fails for any reason they run against the local [`UserDirectory`]
//! instead, and a successful local login mints its own session token. Either way the
//! resulting token is persisted as the current session.

mod directory;
mod error;
mod password;

pub use directory::UserDirectory;
pub use error::AuthError;
pub use password::{hash_password, verify_password};

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use fashion_cube_core::{Email, UserToken};

use super::{Outcome, remote_or_local};
use crate::api::RemoteApi;
use crate::db::sessions::SessionRepository;
use crate::storage::KeyValueStore;

/// Random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Prefix of tokens minted by the local fallback.
pub const LOCAL_TOKEN_PREFIX: &str = "local_";

/// Acknowledgement returned for a successful registration.
pub const REGISTERED_MESSAGE: &str = "Registration successful";

/// Generate an opaque, URL-safe session token.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Authentication bridge.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn RemoteApi>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    /// Create a bridge over `api` with `store` as the local fallback.
    #[must_use]
    pub fn new(api: Arc<dyn RemoteApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    // =========================================================================
    // Login / Registration
    // =========================================================================

    /// Log in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::InvalidInput` for
    /// malformed input.
    /// Returns `AuthError::NotFound` if the email is unknown.
    /// Returns `AuthError::InvalidCredential` if the password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Outcome<UserToken>, AuthError> {
        let email = Email::parse(email)?;
        require("password", password.expose_secret())?;

        let outcome = remote_or_local("login", self.api.login(email.as_str(), password), || {
            let user = UserDirectory::new(self.store.as_ref())
                .authenticate(&email, password.expose_secret())?;
            Ok::<_, AuthError>(UserToken::new(
                user.id,
                user.fullname,
                format!("{LOCAL_TOKEN_PREFIX}{}", generate_token()),
            ))
        })
        .await?;

        SessionRepository::new(self.store.as_ref()).save(&outcome.value)?;

        tracing::info!(
            user_id = %outcome.value.user_id,
            origin = %outcome.origin,
            "User logged in"
        );

        Ok(outcome)
    }

    /// Register a new account.
    ///
    /// The password confirmation is checked before anything else is
    /// attempted. Returns the acknowledgement message.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the passwords differ.
    /// Returns `AuthError::InvalidEmail` or `AuthError::InvalidInput` for
    /// malformed input.
    /// Returns `AuthError::AlreadyExists` if the email is taken.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &SecretString,
        confirm_password: &SecretString,
    ) -> Result<Outcome<String>, AuthError> {
        if password.expose_secret() != confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        let fullname = fullname.trim();
        require("name", fullname)?;
        let email = Email::parse(email)?;
        require("password", password.expose_secret())?;

        let remote = self
            .api
            .register(fullname, email.as_str(), password, confirm_password);

        let outcome = remote_or_local("register", remote, || {
            UserDirectory::new(self.store.as_ref()).enroll(
                fullname,
                &email,
                password.expose_secret(),
            )?;
            Ok::<_, AuthError>(REGISTERED_MESSAGE.to_owned())
        })
        .await?;

        tracing::info!(email = %email, origin = %outcome.origin, "User registered");

        Ok(outcome)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store cannot be written.
    pub fn logout(&self) -> Result<(), AuthError> {
        let sessions = SessionRepository::new(self.store.as_ref());
        if let Some(session) = sessions.current()? {
            tracing::info!(user_id = %session.user_id, "User logged out");
        }
        sessions.clear()?;
        Ok(())
    }

    /// The persisted session, if a user is logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store cannot be read.
    pub fn current_session(&self) -> Result<Option<UserToken>, AuthError> {
        Ok(SessionRepository::new(self.store.as_ref()).current()?)
    }
}

/// Reject a blank required field.
pub(crate) fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::testing::FailingApi;
    use crate::services::Origin;
    use crate::storage::{MemoryStore, keys};

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn offline() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(Arc::new(FailingApi::offline()), store.clone());
        (service, store)
    }

    async fn register(service: &AuthService, email: &str, password: &str) -> Result<Outcome<String>, AuthError> {
        service
            .register("Ada Lovelace", email, &secret(password), &secret(password))
            .await
    }

    #[tokio::test]
    async fn test_offline_register_then_login() {
        let (auth, store) = offline();

        let registered = register(&auth, "ada@example.com", "engine").await.unwrap();
        assert_eq!(registered.origin, Origin::Local);
        assert_eq!(registered.value, REGISTERED_MESSAGE);

        let session = auth
            .login("Ada@Example.com", &secret("engine"))
            .await
            .unwrap();
        assert!(session.is_local());
        assert_eq!(session.value.user_name, "Ada Lovelace");
        assert!(session.value.token.starts_with(LOCAL_TOKEN_PREFIX));
        assert_eq!(auth.current_session().unwrap(), Some(session.value));

        let directory = store.get(keys::USERS).unwrap().unwrap();
        assert!(!directory.contains("engine"));
    }

    #[tokio::test]
    async fn test_offline_duplicate_registration() {
        let (auth, _) = offline();
        register(&auth, "ada@example.com", "engine").await.unwrap();
        assert!(matches!(
            register(&auth, "ada@example.com", "other").await,
            Err(AuthError::AlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_offline_login_failures() {
        let (auth, _) = offline();
        register(&auth, "ada@example.com", "engine").await.unwrap();

        assert!(matches!(
            auth.login("ada@example.com", &secret("wrong")).await,
            Err(AuthError::InvalidCredential)
        ));
        assert!(matches!(
            auth.login("charles@example.com", &secret("engine")).await,
            Err(AuthError::NotFound)
        ));
        assert!(auth.current_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_mismatch_checked_before_remote() {
        // Any remote attempt would fall back and register locally.
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::new(Arc::new(FailingApi { status: 401 }), store);
        let result = auth
            .register("Ada", "ada@example.com", &secret("a"), &secret("b"))
            .await;
        assert!(matches!(result, Err(AuthError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_offline_account_logs_in_after_api_returns() {
        let store = Arc::new(MemoryStore::new());
        let offline = AuthService::new(Arc::new(FailingApi::offline()), store.clone());
        register(&offline, "ada@example.com", "engine").await.unwrap();

        // The API is back but does not know the account.
        let online = AuthService::new(Arc::new(FailingApi { status: 404 }), store);
        let session = online
            .login("ada@example.com", &secret("engine"))
            .await
            .unwrap();
        assert_eq!(session.origin, Origin::Local);
        assert_eq!(online.current_session().unwrap(), Some(session.value));
    }

    #[tokio::test]
    async fn test_rejected_registration_falls_back() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::new(Arc::new(FailingApi { status: 400 }), store);
        let registered = register(&auth, "ada@example.com", "engine").await.unwrap();
        assert!(registered.is_local());
        assert!(matches!(
            register(&auth, "ada@example.com", "engine").await,
            Err(AuthError::AlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_input_validation() {
        let (auth, _) = offline();
        assert!(matches!(
            auth.register("  ", "ada@example.com", &secret("x"), &secret("x"))
                .await,
            Err(AuthError::InvalidInput(_))
        ));
        assert!(matches!(
            register(&auth, "not-an-email", "x").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.login("ada@example.com", &secret("")).await,
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (auth, _) = offline();
        register(&auth, "ada@example.com", "engine").await.unwrap();
        auth.login("ada@example.com", &secret("engine")).await.unwrap();
        auth.logout().unwrap();
        assert!(auth.current_session().unwrap().is_none());
        auth.logout().unwrap();
    }

    #[test]
    fn test_tokens_are_unique_and_url_safe() {
        let a = generate_token();
        assert_ne!(a, generate_token());
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
