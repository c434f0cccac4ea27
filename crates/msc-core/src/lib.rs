//! Domain layer for the MSC Center client.
//!
//! Holds the value types shared by every other crate (identity, content
//! records, response envelopes), the shared error type, and the ports the
//! application layer talks through: [`api::AuthApi`], [`api::ContentApi`] and
//! [`store::DurableStore`].

pub mod api;
pub mod chatbot;
pub mod config;
pub mod content;
pub mod envelope;
pub mod error;
pub mod mentor;
pub mod store;
pub mod user;

// Re-export common error type
pub use error::MscError;
