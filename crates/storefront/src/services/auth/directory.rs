//! Local user directory.
//!
//! The same directory backs the API server and the client's offline
//! fallback: lookup by email, argon2 verification, and enrolment that
//! rejects duplicate emails.

use fashion_cube_core::Email;

use super::AuthError;
use super::password::{hash_password, verify_password};
use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;
use crate::storage::KeyValueStore;

/// Credential checks over the stored user directory.
pub struct UserDirectory<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserDirectory<'a> {
    /// Create a directory over `store`.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if no user has this email.
    /// Returns `AuthError::InvalidCredential` if the password does not match.
    pub fn authenticate(&self, email: &Email, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(email)?
            .ok_or(AuthError::NotFound)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Register a new user, storing only the password hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyExists` if the email is already registered.
    pub fn enroll(&self, fullname: &str, email: &Email, password: &str) -> Result<User, AuthError> {
        // Checked before hashing; the insert re-checks atomically.
        if self.users.get_by_email(email)?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = hash_password(password)?;

        self.users
            .create_with_password(fullname, email, &password_hash)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AlreadyExists,
                other => AuthError::Repository(other),
            })
    }
}
