//! File-backed implementation of [`DurableStore`].

use super::atomic_toml::AtomicTomlFile;
use msc_core::error::Result;
use msc_core::store::DurableStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Durable store persisted as a flat TOML table of strings.
///
/// Batch writes and removals happen inside a single locked update, so the
/// session's `token` and `user` keys are always written and cleared
/// together.
pub struct TomlDurableStore {
    file: AtomicTomlFile<BTreeMap<String, String>>,
}

impl TomlDurableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn snapshot(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}

impl DurableStore for TomlDurableStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.snapshot()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.remove_items(&[key])
    }

    fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        self.file.update(BTreeMap::new(), |map| {
            for (key, value) in items {
                map.insert((*key).to_string(), (*value).to_string());
            }
            Ok(())
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(BTreeMap::new(), |map| {
            for key in keys {
                map.remove(*key);
            }
            Ok(())
        })?;
        tracing::debug!(
            "[TomlDurableStore] Removed {} key(s) from {}",
            keys.len(),
            self.file.path().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msc_core::store::{TOKEN_KEY, USER_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        let store = TomlDurableStore::new(path.clone());
        store
            .set_items(&[(TOKEN_KEY, "tok"), (USER_KEY, r#"{"id":"1"}"#)])
            .unwrap();
        drop(store);

        let reopened = TomlDurableStore::new(path);
        assert_eq!(reopened.get_item(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert_eq!(
            reopened.get_item(USER_KEY).unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
    }

    #[test]
    fn test_remove_items_clears_both_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlDurableStore::new(temp_dir.path().join("session.toml"));
        store.set_item(TOKEN_KEY, "tok").unwrap();
        store.set_item(USER_KEY, "{}").unwrap();
        store.set_item("theme", "dark").unwrap();

        store.remove_items(&[TOKEN_KEY, USER_KEY]).unwrap();

        assert!(store.get_item(TOKEN_KEY).unwrap().is_none());
        assert!(store.get_item(USER_KEY).unwrap().is_none());
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_remove_on_missing_file_does_not_create_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        let store = TomlDurableStore::new(path.clone());

        store.remove_item(TOKEN_KEY).unwrap();
        assert!(!path.exists());
        assert!(store.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let store = TomlDurableStore::new(path.clone());

        store
            .set_items(&[(TOKEN_KEY, "tok"), (USER_KEY, "{}")])
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
