//! Current-session repository (client side).

use fashion_cube_core::UserToken;

use super::RepositoryError;
use crate::storage::{self, KeyValueStore, keys};

/// Repository for the logged-in user's token under `user_token`.
pub struct SessionRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    pub fn current(&self) -> Result<Option<UserToken>, RepositoryError> {
        Ok(storage::get_json(self.store, keys::SESSION)?)
    }

    /// Persist `token` as the current session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn save(&self, token: &UserToken) -> Result<(), RepositoryError> {
        storage::set_json(self.store, keys::SESSION, token)?;
        Ok(())
    }

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::SESSION)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fashion_cube_core::UserId;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_save_current_clear() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        assert!(sessions.current().unwrap().is_none());

        let token = UserToken::new(UserId::new("u1"), "Ada", "t0k3n");
        sessions.save(&token).unwrap();
        assert_eq!(sessions.current().unwrap(), Some(token));

        sessions.clear().unwrap();
        assert!(sessions.current().unwrap().is_none());
    }
}
