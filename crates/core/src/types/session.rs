//! Session token issued on login.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Default lifetime tag attached to issued tokens.
pub const DEFAULT_EXPIRE_IN: &str = "7d";

/// The `user_token` object returned by `POST /users/login`.
///
/// Held by the client for the browser session and presented back to the API
/// in the `authorization` header. `Debug` redacts the token string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub user_id: UserId,
    pub user_name: String,
    pub token: String,
    #[serde(default = "default_expire_in")]
    pub expire_in: String,
}

fn default_expire_in() -> String {
    DEFAULT_EXPIRE_IN.to_owned()
}

impl UserToken {
    /// Build a token with the default expiry tag.
    #[must_use]
    pub fn new(user_id: UserId, user_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            token: token.into(),
            expire_in: default_expire_in(),
        }
    }

    /// Tag the token with the lifetime it is actually issued for.
    #[must_use]
    pub fn with_lifetime(mut self, ttl: Duration) -> Self {
        self.expire_in = lifetime_tag(ttl);
        self
    }
}

/// Compact lifetime tag for `expire_in`: whole days (`7d`), else whole
/// hours (`12h`), else minutes (`90m`).
#[must_use]
pub fn lifetime_tag(ttl: Duration) -> String {
    const HOUR: u64 = 3600;
    const DAY: u64 = 24 * HOUR;

    let secs = ttl.as_secs();
    if secs >= DAY && secs % DAY == 0 {
        format!("{}d", secs / DAY)
    } else if secs >= HOUR && secs % HOUR == 0 {
        format!("{}h", secs / HOUR)
    } else {
        format!("{}m", secs.div_ceil(60))
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserToken")
            .field("user_id", &self.user_id)
            .field("user_name", &self.user_name)
            .field("token", &"[REDACTED]")
            .field("expire_in", &self.expire_in)
            .finish()
    }
}
