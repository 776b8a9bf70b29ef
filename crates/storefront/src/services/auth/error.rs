//! Authentication error types.

use thiserror::Error;

use fashion_cube_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A required field is missing or malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// Wrong password for a known user.
    #[error("invalid credentials")]
    InvalidCredential,

    /// No user with this email.
    #[error("user not found")]
    NotFound,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Email is already registered.
    #[error("user already exists")]
    AlreadyExists,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
