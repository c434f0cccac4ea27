//! Authentication session management.

mod manager;
mod persistence;

pub use manager::{
    LOGIN_FAILED_MESSAGE, LoginOutcome, REGISTER_FAILED_MESSAGE, RegisterOutcome, SessionManager,
    SessionSnapshot,
};
pub use persistence::{SessionPersistence, StoredSession};
