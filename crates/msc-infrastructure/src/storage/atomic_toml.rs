//! Atomic TOML file operations.
//!
//! Every write goes to a sibling temp file that is fsynced and renamed over
//! the target, so readers see either the old or the new document, never a
//! torn one. Read-modify-write cycles hold an exclusive lock file.

use msc_core::error::{MscError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Handle to a TOML document stored at a fixed path.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// A missing or blank file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Writes the document via temp file + rename.
    ///
    /// The file ends up readable by its owner only, whatever it was before.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        // A leftover temp file would keep its old permissions.
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }
        let mut tmp_file = private_file_options().open(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write.
    ///
    /// `default_value` seeds the document when the file does not exist yet.
    /// Nothing is written if `f` fails.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| MscError::io(format!("path has no file name: {}", self.path.display())))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Options for the temp file: owner read/write only on unix.
fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

/// Exclusive lock held for the lifetime of the guard.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| MscError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the lock itself is released with the handle.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        api_url: String,
        retries: u32,
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("missing.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_blank_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.toml");
        fs::write(&path, "   \n").unwrap();
        let file = AtomicTomlFile::<Prefs>::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("prefs.toml");
        let file = AtomicTomlFile::<Prefs>::new(path.clone());

        let prefs = Prefs {
            api_url: "http://localhost:8080/api".to_string(),
            retries: 0,
        };
        file.save(&prefs).unwrap();

        assert_eq!(file.load().unwrap(), Some(prefs));
        assert!(!temp_dir.path().join("nested").join(".prefs.toml.tmp").exists());
    }

    #[test]
    fn test_update_on_string_map() {
        let temp_dir = TempDir::new().unwrap();
        let file =
            AtomicTomlFile::<BTreeMap<String, String>>::new(temp_dir.path().join("kv.toml"));

        file.update(BTreeMap::new(), |map| {
            map.insert("token".to_string(), "abc".to_string());
            Ok(())
        })
        .unwrap();
        file.update(BTreeMap::new(), |map| {
            map.insert("user".to_string(), "{}".to_string());
            Ok(())
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["token"], "abc");
        assert!(!temp_dir.path().join("kv.lock").exists());
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.toml");
        let file = AtomicTomlFile::<BTreeMap<String, String>>::new(path.clone());

        let result = file.update(BTreeMap::new(), |map| {
            map.insert("token".to_string(), "abc".to_string());
            Err(MscError::internal("abort"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
