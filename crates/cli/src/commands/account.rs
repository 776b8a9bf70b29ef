//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! fc-cli account register -n "Ada Lovelace" -e ada@example.com -p engine
//! fc-cli account login -e ada@example.com -p engine
//! fc-cli account whoami
//! fc-cli account logout
//! ```

use secrecy::SecretString;
use tracing::info;

use fashion_cube_core::UserToken;
use fashion_cube_storefront::services::AuthService;

use super::{CliError, origin_note};

/// Register an account. `confirm` defaults to `password`.
///
/// # Errors
///
/// Returns `CliError::Auth` if the passwords differ, the input is invalid or
/// the email is taken.
pub async fn register(
    auth: &AuthService,
    name: &str,
    email: &str,
    password: String,
    confirm: Option<String>,
) -> Result<(), CliError> {
    let confirm = SecretString::from(confirm.unwrap_or_else(|| password.clone()));
    let password = SecretString::from(password);

    let outcome = auth.register(name, email, &password, &confirm).await?;
    info!("{}{}", outcome.value, origin_note(outcome.origin));
    Ok(())
}

/// Log in and keep the session for later commands.
///
/// # Errors
///
/// Returns `CliError::Auth` if the email is unknown or the password is wrong.
pub async fn login(auth: &AuthService, email: &str, password: String) -> Result<(), CliError> {
    let password = SecretString::from(password);
    let outcome = auth.login(email, &password).await?;
    info!(
        "Logged in as {}{}",
        outcome.value.user_name,
        origin_note(outcome.origin)
    );
    Ok(())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns `CliError::Auth` if the local store cannot be written.
pub fn logout(auth: &AuthService) -> Result<(), CliError> {
    auth.logout()?;
    info!("Logged out");
    Ok(())
}

/// Show the stored session.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` if there is no session.
pub fn whoami(auth: &AuthService) -> Result<(), CliError> {
    let session = require_session(auth)?;
    info!("{} ({})", session.user_name, session.user_id);
    Ok(())
}

/// The stored session, or `CliError::NotLoggedIn`.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` if there is no session.
pub fn require_session(auth: &AuthService) -> Result<UserToken, CliError> {
    auth.current_session()?.ok_or(CliError::NotLoggedIn)
}
