//! Loads [`ClientConfig`] from `config.toml` plus environment overrides.

use crate::paths::MscPaths;
use crate::storage::AtomicTomlFile;
use msc_core::config::ClientConfig;
use msc_core::error::Result;
use std::path::PathBuf;

/// Overrides `api_url`.
pub const ENV_API_URL: &str = "MSC_API_URL";
/// Overrides `log_level`.
pub const ENV_LOG_LEVEL: &str = "MSC_LOG_LEVEL";

/// Configuration loader.
///
/// The file is created with defaults on first use so there is always
/// something to edit.
pub struct ConfigService {
    paths: MscPaths,
}

impl ConfigService {
    pub fn new(paths: MscPaths) -> Self {
        Self { paths }
    }

    /// Loads the configuration, applying process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads the configuration, reading overrides through `env`.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = AtomicTomlFile::<ClientConfig>::new(self.paths.config_file()?);

        let config = match file.load()? {
            Some(config) => config,
            None => {
                let config = ClientConfig::default();
                if let Err(e) = file.save(&config) {
                    // Read-only home directories still get a working client.
                    tracing::warn!(
                        "[ConfigService] Could not write default config to {}: {}",
                        file.path().display(),
                        e
                    );
                }
                config
            }
        };

        Ok(apply_overrides(config, env))
    }

    /// Where the durable session file lives for `config`.
    pub fn session_file(&self, config: &ClientConfig) -> Result<PathBuf> {
        match &config.storage_file {
            Some(path) => Ok(path.clone()),
            None => self.paths.session_file(),
        }
    }
}

fn apply_overrides<F>(mut config: ClientConfig, env: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("[ConfigService] api_url overridden by {}", ENV_API_URL);
        config.api_url = url;
    }
    if let Some(level) = env(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    config.api_url = config.api_url.trim().trim_end_matches('/').to_string();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use msc_core::config::DEFAULT_API_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(MscPaths::new(Some(temp_dir.path())));

        let config = service.load_with_env(|_| None).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(temp_dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "api_url = \"https://file.example/api\"\nlog_level = \"warn\"\n",
        )
        .unwrap();
        let service = ConfigService::new(MscPaths::new(Some(temp_dir.path())));

        let config = service
            .load_with_env(|key| match key {
                ENV_API_URL => Some("https://env.example/api/".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.api_url, "https://env.example/api");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_session_file_honours_storage_override() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(MscPaths::new(Some(temp_dir.path())));

        let mut config = ClientConfig::default();
        assert_eq!(
            service.session_file(&config).unwrap(),
            temp_dir.path().join("session.toml")
        );

        config.storage_file = Some(PathBuf::from("/var/lib/msc/session.toml"));
        assert_eq!(
            service.session_file(&config).unwrap(),
            PathBuf::from("/var/lib/msc/session.toml")
        );
    }
}
