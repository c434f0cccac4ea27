use msc_core::api::AuthApi;
use msc_core::error::{CONNECTION_FAILED_MESSAGE, MscError, Result};
use msc_core::store::DurableStore;
use msc_core::user::{LoginRequest, RegisterForm, RegisteredAccount, UserData};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::persistence::SessionPersistence;

/// Login failure text when the backend gives no reason.
pub const LOGIN_FAILED_MESSAGE: &str = "Đăng nhập thất bại";
/// Registration failure text when the backend gives no reason.
pub const REGISTER_FAILED_MESSAGE: &str = "Có lỗi xảy ra khi đăng ký";

/// Observable state of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current identity, absent when logged out.
    pub identity: Option<UserData>,
    /// True until [`SessionManager::restore`] has finished.
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Whether an identity is present.
    ///
    /// Provisional while `is_loading` is true.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The identity once restore has confirmed it.
    pub fn confirmed_identity(&self) -> Option<&UserData> {
        if self.is_loading {
            None
        } else {
            self.identity.as_ref()
        }
    }
}

/// Result of [`SessionManager::login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    /// Backend status text. Always present on failure.
    pub message: Option<String>,
}

/// Result of [`SessionManager::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub account: Option<RegisteredAccount>,
}

/// Owns the authenticated identity of this client.
///
/// `SessionManager` is responsible for:
/// - Restoring a persisted session on startup and validating it remotely
/// - Logging in and out
/// - Keeping the durable `token`/`user` mirror in step with the identity
/// - Notifying observers of every change through a `watch` channel
///
/// Session-mutating operations must not overlap; the manager is the only
/// writer of the session keys.
pub struct SessionManager {
    auth: Arc<dyn AuthApi>,
    persistence: SessionPersistence,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionManager {
    /// Creates a manager in the loading state. Call [`restore`](Self::restore) next.
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<dyn DurableStore>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            identity: None,
            is_loading: true,
        });
        Self {
            auth,
            persistence: SessionPersistence::new(store),
            state,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receives a new snapshot on every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> Option<UserData> {
        self.state.borrow().identity.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Restores the persisted session and validates its token.
    ///
    /// The cached identity is shown optimistically while the profile request
    /// is in flight. Any failure logs the session out. Never fails.
    pub async fn restore(&self) {
        self.state.send_modify(|s| s.is_loading = true);

        match self.persistence.load() {
            Ok(Some(stored)) => {
                self.set_identity(Some(stored.user));
                match self.auth.profile(&stored.token).await {
                    Ok(_) => {
                        tracing::info!("[SessionManager] Restored session");
                    }
                    Err(e) => {
                        tracing::warn!("[SessionManager] Stored session rejected: {}", e);
                        self.clear_local();
                    }
                }
            }
            Ok(None) => {
                tracing::debug!("[SessionManager] No stored session");
            }
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to read stored session: {}", e);
                self.clear_local();
            }
        }

        self.state.send_modify(|s| s.is_loading = false);
    }

    /// Authenticates with the backend and persists the new session.
    ///
    /// On failure the current identity is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let success = match self.auth.login(&request).await {
            Ok(success) => success,
            Err(e) => {
                tracing::warn!("[SessionManager] Login failed for {}: {}", email, e);
                return LoginOutcome {
                    success: false,
                    message: Some(failure_text(&e, LOGIN_FAILED_MESSAGE)),
                };
            }
        };

        let user = success.data.user.with_display_name();
        if let Err(e) = self.persistence.save(&success.data.token, &user) {
            tracing::error!("[SessionManager] Failed to persist session: {}", e);
            return LoginOutcome {
                success: false,
                message: Some(e.user_message()),
            };
        }

        tracing::info!("[SessionManager] Logged in as {}", user.email);
        self.set_identity(Some(user));
        LoginOutcome {
            success: true,
            message: success.message,
        }
    }

    /// Logs out locally and notifies the backend in the background.
    ///
    /// The returned handle tracks the notification; callers that are about
    /// to exit may await it, everyone else can drop it.
    pub fn logout(&self) -> Option<JoinHandle<()>> {
        let token = match self.persistence.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to read token on logout: {}", e);
                None
            }
        };

        self.clear_local();
        tracing::info!("[SessionManager] Logged out");

        token.and_then(|token| self.notify_logout(token))
    }

    /// Re-fetches the identity.
    ///
    /// Failures, including failing to cache the new identity, leave the
    /// session untouched.
    pub async fn refresh_user(&self) {
        let token = match self.persistence.token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("[SessionManager] No token to refresh with");
                return;
            }
            Err(e) => {
                tracing::warn!("[SessionManager] Failed to read token: {}", e);
                return;
            }
        };

        match self.auth.profile(&token).await {
            Ok(user) => {
                let user = user.with_display_name();
                // Memory never runs ahead of the cached copy.
                if let Err(e) = self.persistence.save_user(&user) {
                    tracing::warn!("[SessionManager] Failed to cache refreshed user: {}", e);
                    return;
                }
                self.set_identity(Some(user));
            }
            Err(e) => {
                tracing::warn!("[SessionManager] Refresh user failed: {}", e);
            }
        }
    }

    /// Creates an account. The session is not changed; log in afterwards.
    pub async fn register(&self, form: RegisterForm) -> RegisterOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return RegisterOutcome::failed(e.user_message()),
        };

        match self.auth.register(&request).await {
            Ok(success) => {
                tracing::info!("[SessionManager] Registered {}", success.data.email);
                RegisterOutcome {
                    success: true,
                    message: success.message,
                    account: Some(success.data),
                }
            }
            Err(e) => {
                tracing::warn!("[SessionManager] Registration failed: {}", e);
                RegisterOutcome::failed(failure_text(&e, REGISTER_FAILED_MESSAGE))
            }
        }
    }

    fn set_identity(&self, identity: Option<UserData>) {
        self.state.send_modify(|s| s.identity = identity);
    }

    fn clear_local(&self) {
        if let Err(e) = self.persistence.clear() {
            tracing::error!("[SessionManager] Failed to clear stored session: {}", e);
        }
        self.set_identity(None);
    }

    fn notify_logout(&self, token: String) -> Option<JoinHandle<()>> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("[SessionManager] No runtime, skipping backend logout");
            return None;
        };
        let auth = self.auth.clone();
        Some(handle.spawn(async move {
            if let Err(e) = notify(auth.as_ref(), &token).await {
                tracing::debug!("[SessionManager] Backend logout failed: {}", e);
            }
        }))
    }
}

async fn notify(auth: &dyn AuthApi, token: &str) -> Result<()> {
    auth.logout(token).await.map(|_| ())
}

impl RegisterOutcome {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            account: None,
        }
    }
}

fn failure_text(error: &MscError, fallback: &str) -> String {
    match error {
        MscError::Network(_) | MscError::MalformedResponse(_) => {
            CONNECTION_FAILED_MESSAGE.to_string()
        }
        MscError::Api { message, .. } if message.trim().is_empty() => fallback.to_string(),
        MscError::Api { message, .. } => message.clone(),
        other => other.user_message(),
    }
}
