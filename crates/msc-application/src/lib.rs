//! Application layer of the MSC client.
//!
//! Orchestrates the backend ports from `msc-core` into the state holders the
//! presentation layer observes: the authentication session, content loaders
//! and the assistant chat transcript.

pub mod chat;
pub mod resource;
pub mod session;

pub use chat::{ChatMessage, ChatSession, Sender};
pub use resource::{
    BlogPostDetailLoader, BlogPostsLoader, ProgramsLoader, ProjectDetailLoader, ProjectsLoader,
    ResourceLoader, ResourceView, ViewState,
};
pub use session::{LoginOutcome, RegisterOutcome, SessionManager, SessionSnapshot};
