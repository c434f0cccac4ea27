//! Outbound ports to the backend.
//!
//! The application layer only ever reaches the backend through these two
//! traits. The HTTP implementation lives in `msc-interaction`; tests supply
//! hand-written mocks.

use crate::content::{BlogPost, ContentQuery, Paginated, Program, Project};
use crate::envelope::ApiSuccess;
use crate::error::Result;
use crate::user::{AuthPayload, LoginRequest, RegisterRequest, RegisteredAccount, UserData};
use async_trait::async_trait;

/// Authentication endpoints (`/auth/*`).
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an identity and a bearer token.
    async fn login(&self, request: &LoginRequest) -> Result<ApiSuccess<AuthPayload>>;

    /// Creates a new account. Does not log the account in.
    async fn register(&self, request: &RegisterRequest) -> Result<ApiSuccess<RegisteredAccount>>;

    /// Fetches the identity the token belongs to.
    ///
    /// Any error means the token cannot be trusted.
    async fn profile(&self, token: &str) -> Result<UserData>;

    /// Notifies the backend that the token is no longer in use.
    ///
    /// Returns the backend's status message, if any.
    async fn logout(&self, token: &str) -> Result<Option<String>>;
}

/// Public content endpoints.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /programs`
    async fn programs(&self) -> Result<Vec<Program>>;

    /// `GET /projects`
    async fn projects(&self, query: &ContentQuery) -> Result<Paginated<Project>>;

    /// `GET /projects/slug/:slug`
    async fn project_by_slug(&self, slug: &str) -> Result<Project>;

    /// `GET /allblogposts`
    async fn blog_posts(&self, query: &ContentQuery) -> Result<Paginated<BlogPost>>;

    /// `GET /allblogposts/slug/:slug`
    async fn blog_post_by_slug(&self, slug: &str) -> Result<BlogPost>;
}
