//! User directory repository.
//!
//! The directory is a single JSON array under `ecommerce_users`. Lookups scan
//! it; inserts go through an atomic read-modify-write so two registrations
//! for the same email cannot both succeed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fashion_cube_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;
use crate::storage::{self, KeyValueStore, keys};

/// Stored shape of a directory entry.
#[derive(Clone, Serialize, Deserialize)]
struct UserRow {
    #[serde(rename = "_id")]
    id: UserId,
    fullname: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in user directory: {e}"))
        })?;

        Ok((
            User {
                id: self.id,
                fullname: self.fullname,
                email,
                created_at: self.created_at,
            },
            self.password_hash,
        ))
    }
}

/// Repository for the user directory.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn rows(&self) -> Result<Vec<UserRow>, RepositoryError> {
        Ok(storage::get_json(self.store, keys::USERS)?.unwrap_or_default())
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.get_password_hash(email)?.map(|(user, _)| user))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.rows()?
            .into_iter()
            .find(|row| &row.id == id)
            .map(|row| row.into_user().map(|(user, _)| user))
            .transpose()
    }

    /// Get a user together with their password hash, for verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        self.rows()?
            .into_iter()
            .find(|row| row.email.eq_ignore_ascii_case(email.as_str()))
            .map(UserRow::into_user)
            .transpose()
    }

    /// Append a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn create_with_password(
        &self,
        fullname: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = UserRow {
            id: UserId::generate(),
            fullname: fullname.to_owned(),
            email: email.as_str().to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };

        let inserted = storage::update_json(self.store, keys::USERS, |rows| {
            let mut rows: Vec<UserRow> = rows.unwrap_or_default();
            if rows
                .iter()
                .any(|existing| existing.email.eq_ignore_ascii_case(email.as_str()))
            {
                return Err(RepositoryError::Conflict("email already exists".to_owned()));
            }
            rows.push(row.clone());
            Ok((rows, row))
        })?;

        let (user, _) = inserted.into_user()?;
        Ok(user)
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.rows()?.len())
    }
}
