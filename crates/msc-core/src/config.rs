//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Runtime configuration of a client instance.
///
/// Persisted as `config.toml`; every field has a default so a partial file
/// still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to.
    pub api_url: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Overrides the location of the durable session file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            storage_file: None,
        }
    }
}

impl ClientConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(r#"api_url = "https://api.msc.edu.vn/api/""#).unwrap();
        assert_eq!(config.base_url(), "https://api.msc.edu.vn/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }
}
