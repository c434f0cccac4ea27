//! Durable key-value storage port.
//!
//! Models the client-local store that outlives the process (the browser's
//! local storage on the original site). Access is synchronous and local.

use crate::error::{MscError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized identity.
pub const USER_KEY: &str = "user";

/// A string-to-string store that survives restarts.
///
/// The batch methods have looping default implementations; stores that can
/// write several keys in one step should override them.
pub trait DurableStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// Process-local store, used by tests and ephemeral clients.
#[derive(Debug, Default)]
pub struct InMemoryDurableStore {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryDurableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStore for InMemoryDurableStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| MscError::storage(format!("store lock poisoned: {}", e)))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| MscError::storage(format!("store lock poisoned: {}", e)))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| MscError::storage(format!("store lock poisoned: {}", e)))?;
        items.remove(key);
        Ok(())
    }

    fn set_items(&self, batch: &[(&str, &str)]) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| MscError::storage(format!("store lock poisoned: {}", e)))?;
        for (key, value) in batch {
            items.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| MscError::storage(format!("store lock poisoned: {}", e)))?;
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}
