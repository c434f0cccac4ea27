use msc_core::error::{MscError, Result};
use msc_core::store::{DurableStore, TOKEN_KEY, USER_KEY};
use msc_core::user::UserData;
use std::sync::Arc;

/// Token and identity as found in durable storage.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: UserData,
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &"***")
            .field("user", &self.user)
            .finish()
    }
}

/// Owns the `token` and `user` keys of a [`DurableStore`].
///
/// Both keys are written together and removed together.
#[derive(Clone)]
pub struct SessionPersistence {
    store: Arc<dyn DurableStore>,
}

impl SessionPersistence {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    /// Reads the stored session.
    ///
    /// Returns `Ok(None)` when either key is missing or empty, and an error
    /// when the cached identity cannot be parsed.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        let token = self.token()?;
        let user = self.store.get_item(USER_KEY)?.filter(|v| !v.is_empty());

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        let user: UserData = serde_json::from_str(&user)
            .map_err(|e| MscError::storage(format!("Cached user is unreadable: {}", e)))?;
        Ok(Some(StoredSession { token, user }))
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.store.get_item(TOKEN_KEY)?.filter(|v| !v.is_empty()))
    }

    pub fn save(&self, token: &str, user: &UserData) -> Result<()> {
        let user = serde_json::to_string(user)?;
        self.store.set_items(&[(TOKEN_KEY, token), (USER_KEY, &user)])
    }

    /// Replaces the cached identity, keeping the token.
    pub fn save_user(&self, user: &UserData) -> Result<()> {
        let user = serde_json::to_string(user)?;
        self.store.set_item(USER_KEY, &user)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove_items(&[TOKEN_KEY, USER_KEY])
    }
}
