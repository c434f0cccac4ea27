//! Backend adapters for the MSC client.

pub mod http_backend;

pub use http_backend::HttpBackend;
