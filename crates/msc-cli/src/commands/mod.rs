pub mod auth;
pub mod chat;
pub mod content;
pub mod mentors;

use msc_application::SessionManager;
use msc_core::config::ClientConfig;
use msc_infrastructure::TomlDurableStore;
use msc_interaction::HttpBackend;
use std::path::PathBuf;
use std::sync::Arc;

/// Services shared by the commands.
pub struct AppContext {
    pub backend: Arc<HttpBackend>,
    pub session: SessionManager,
}

impl AppContext {
    pub fn new(config: &ClientConfig, session_file: PathBuf) -> Self {
        let backend = Arc::new(HttpBackend::from_config(config));
        let store = Arc::new(TomlDurableStore::new(session_file));
        let session = SessionManager::new(backend.clone(), store);
        Self { backend, session }
    }
}
