//! Unified path management for client files.
//!
//! ```text
//! ~/.config/msc/               # Config directory (platform default)
//! ├── config.toml              # ClientConfig
//! └── session.toml             # Durable store (token + cached user)
//! ```
//!
//! Tests pass an explicit base directory instead of the platform default.

use msc_core::error::{MscError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "msc";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";

/// Resolves where the client keeps its files.
#[derive(Debug, Clone, Default)]
pub struct MscPaths {
    base: Option<PathBuf>,
}

impl MscPaths {
    /// `base` replaces the platform config directory when given.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// The client's configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| MscError::config("Cannot find home directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    pub fn session_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(SESSION_FILE))
    }
}
