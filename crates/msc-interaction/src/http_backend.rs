//! HttpBackend - reqwest implementation of the backend ports.
//!
//! Every endpoint answers with the `{success, message?, data?, error?}`
//! envelope. Responses are read as text first so that non-JSON bodies
//! (proxies, crashed upstreams) still produce a readable error.

use async_trait::async_trait;
use msc_core::api::{AuthApi, ContentApi};
use msc_core::config::ClientConfig;
use msc_core::content::{BlogPost, ContentQuery, Paginated, Program, Project};
use msc_core::envelope::{ApiEnvelope, ApiSuccess};
use msc_core::error::{MscError, Result};
use msc_core::user::{AuthPayload, LoginRequest, RegisterRequest, RegisteredAccount, UserData};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Backend client speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (trailing `/` ignored).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        tracing::info!("[HttpBackend] Using API at {}", config.base_url());
        Self::new(
            config.base_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).timeout(self.timeout)
    }

    fn get_url(&self, url: Url) -> RequestBuilder {
        self.client.get(url).timeout(self.timeout)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).timeout(self.timeout)
    }

    /// Adds the bearer token to a request.
    fn auth_request(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token))
    }

    /// Sends a request and returns the status with the raw body.
    async fn execute(&self, what: &str, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("[HttpBackend] {} failed to send: {}", what, e);
            MscError::network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MscError::network(format!("Failed to read {} response: {}", what, e)))?;
        tracing::debug!("[HttpBackend] {} -> {}", what, status);
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        what: &str,
        request: RequestBuilder,
    ) -> Result<ApiSuccess<T>> {
        let (status, body) = self.execute(what, request).await?;
        decode_envelope::<T>(status, &body)?.into_success(Some(status.as_u16()))
    }

    async fn acknowledge(&self, what: &str, request: RequestBuilder) -> Result<Option<String>> {
        let (status, body) = self.execute(what, request).await?;
        decode_envelope::<serde_json::Value>(status, &body)?.into_ack(Some(status.as_u16()))
    }
}

/// Parses a response body into an envelope.
///
/// A body that is not an envelope is malformed on 2xx and reported as the
/// HTTP status otherwise.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<ApiEnvelope<T>> {
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(e) if status.is_success() => Err(MscError::malformed(e.to_string())),
        Err(_) => Err(MscError::api_with_status(
            status.as_u16(),
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            ),
        )),
    }
}

/// Appends `segments` to `base`, percent-encoding each one.
fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| MscError::config(format!("Invalid API URL '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| MscError::config(format!("API URL cannot take a path: '{}'", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn slug_url(base: &str, collection: &str, slug: &str) -> Result<Url> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(MscError::validation("Slug must not be empty"));
    }
    endpoint_url(base, &[collection, "slug", slug])
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<ApiSuccess<AuthPayload>> {
        tracing::info!("[HttpBackend] Logging in as {}", request.email);
        self.fetch("login", self.post("/auth/login").json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiSuccess<RegisteredAccount>> {
        tracing::info!("[HttpBackend] Registering {}", request.email);
        self.fetch("register", self.post("/auth/register").json(request))
            .await
    }

    async fn profile(&self, token: &str) -> Result<UserData> {
        let request = self.auth_request(self.get("/auth/profile"), token);
        Ok(self.fetch::<UserData>("profile", request).await?.data)
    }

    async fn logout(&self, token: &str) -> Result<Option<String>> {
        let request = self.auth_request(self.post("/auth/logout"), token);
        self.acknowledge("logout", request).await
    }
}

#[async_trait]
impl ContentApi for HttpBackend {
    async fn programs(&self) -> Result<Vec<Program>> {
        Ok(self.fetch("programs", self.get("/programs")).await?.data)
    }

    async fn projects(&self, query: &ContentQuery) -> Result<Paginated<Project>> {
        let request = self.get("/projects").query(&query.to_pairs());
        Ok(self.fetch("projects", request).await?.data)
    }

    async fn project_by_slug(&self, slug: &str) -> Result<Project> {
        let url = slug_url(&self.base_url, "projects", slug)?;
        Ok(self.fetch("project", self.get_url(url)).await?.data)
    }

    async fn blog_posts(&self, query: &ContentQuery) -> Result<Paginated<BlogPost>> {
        let request = self.get("/allblogposts").query(&query.to_pairs());
        Ok(self.fetch("blog posts", request).await?.data)
    }

    async fn blog_post_by_slug(&self, slug: &str) -> Result<BlogPost> {
        let url = slug_url(&self.base_url, "allblogposts", slug)?;
        Ok(self.fetch("blog post", self.get_url(url)).await?.data)
    }
}
