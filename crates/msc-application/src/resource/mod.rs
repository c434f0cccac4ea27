//! Remote resource loading.
//!
//! Every view that shows backend content owns one loader. A loader moves
//! through `Loading` into exactly one terminal state per fetch, and only the
//! most recently started fetch may set that terminal state.

mod content;
mod loader;

pub use content::{
    BlogPostDetailLoader, BlogPostsLoader, ProgramsLoader, ProjectDetailLoader, ProjectsLoader,
    QueryLoader,
};
pub use loader::{Fetched, ResourceLoader, ResourceView, ViewState};
