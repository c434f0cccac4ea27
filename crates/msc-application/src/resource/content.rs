//! Typed loaders for the content endpoints.

use super::loader::{Fetched, ResourceLoader, ResourceView};
use msc_core::api::ContentApi;
use msc_core::content::{BlogPost, ContentQuery, Program, Project};
use msc_core::error::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<Fetched<T>>> + Send>>;
type FetchFn<Q, T> = dyn Fn(Arc<dyn ContentApi>, Q) -> FetchFuture<T> + Send + Sync;

/// A [`ResourceLoader`] bound to one endpoint and the last query sent to it.
pub struct QueryLoader<Q, T> {
    api: Arc<dyn ContentApi>,
    fetch: Box<FetchFn<Q, T>>,
    last_query: Mutex<Option<Q>>,
    loader: ResourceLoader<T>,
}

/// `GET /programs`
pub type ProgramsLoader = QueryLoader<(), Program>;
/// `GET /projects`
pub type ProjectsLoader = QueryLoader<ContentQuery, Project>;
/// `GET /projects/slug/:slug`
pub type ProjectDetailLoader = QueryLoader<String, Project>;
/// `GET /allblogposts`
pub type BlogPostsLoader = QueryLoader<ContentQuery, BlogPost>;
/// `GET /allblogposts/slug/:slug`
pub type BlogPostDetailLoader = QueryLoader<String, BlogPost>;

impl<Q, T> QueryLoader<Q, T>
where
    Q: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn with_fetch<F>(api: Arc<dyn ContentApi>, resource: &'static str, fetch: F) -> Self
    where
        F: Fn(Arc<dyn ContentApi>, Q) -> FetchFuture<T> + Send + Sync + 'static,
    {
        Self {
            api,
            fetch: Box::new(fetch),
            last_query: Mutex::new(None),
            loader: ResourceLoader::new(resource),
        }
    }

    /// Fetches with `query`, remembering it for [`retry`](Self::retry).
    pub async fn load(&self, query: Q) -> ResourceView<T> {
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.clone());
        }
        let fetch = (self.fetch)(self.api.clone(), query);
        self.loader.run(fetch).await
    }

    /// Re-runs the last query. Does nothing before the first load.
    pub async fn retry(&self) -> ResourceView<T> {
        let query = self.last_query.lock().ok().and_then(|last| last.clone());
        match query {
            Some(query) => self.load(query).await,
            None => {
                tracing::debug!(
                    "[ResourceLoader] Nothing to retry for {}",
                    self.loader.resource()
                );
                self.loader.view()
            }
        }
    }

    pub fn view(&self) -> ResourceView<T> {
        self.loader.view()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ResourceView<T>> {
        self.loader.subscribe()
    }
}

impl ProgramsLoader {
    pub fn programs(api: Arc<dyn ContentApi>) -> Self {
        Self::with_fetch(api, "programs", |api, ()| {
            Box::pin(async move { api.programs().await.map(Fetched::items) })
        })
    }
}

impl ProjectsLoader {
    pub fn projects(api: Arc<dyn ContentApi>) -> Self {
        Self::with_fetch(api, "projects", |api, query: ContentQuery| {
            Box::pin(async move {
                let (items, page) = api.projects(&query).await?.into_parts();
                Ok(Fetched::page(items, page))
            })
        })
    }
}

impl ProjectDetailLoader {
    pub fn project(api: Arc<dyn ContentApi>) -> Self {
        Self::with_fetch(api, "project", |api, slug: String| {
            Box::pin(async move {
                let project = api.project_by_slug(&slug).await?;
                Ok(Fetched::items(vec![project]))
            })
        })
    }
}

impl BlogPostsLoader {
    pub fn blog_posts(api: Arc<dyn ContentApi>) -> Self {
        Self::with_fetch(api, "blog posts", |api, query: ContentQuery| {
            Box::pin(async move {
                let (items, page) = api.blog_posts(&query).await?.into_parts();
                Ok(Fetched::page(items, page))
            })
        })
    }
}

impl BlogPostDetailLoader {
    pub fn blog_post(api: Arc<dyn ContentApi>) -> Self {
        Self::with_fetch(api, "blog post", |api, slug: String| {
            Box::pin(async move {
                let post = api.blog_post_by_slug(&slug).await?;
                Ok(Fetched::items(vec![post]))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ViewState;
    use async_trait::async_trait;
    use msc_core::content::Paginated;
    use msc_core::error::MscError;

    #[derive(Default)]
    struct MockContentApi {
        programs: Mutex<Option<Result<Vec<Program>>>>,
        projects: Mutex<Option<Result<Paginated<Project>>>>,
        queries: Mutex<Vec<ContentQuery>>,
        slugs: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContentApi for MockContentApi {
        async fn programs(&self) -> Result<Vec<Program>> {
            self.programs
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn projects(&self, query: &ContentQuery) -> Result<Paginated<Project>> {
            self.queries.lock().unwrap().push(query.clone());
            self.projects
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(MscError::network("no projects configured")))
        }

        async fn project_by_slug(&self, slug: &str) -> Result<Project> {
            self.slugs.lock().unwrap().push(slug.to_string());
            if slug == "ai-bootcamp" {
                Ok(Project {
                    slug: slug.to_string(),
                    title: "AI Bootcamp".to_string(),
                    ..Default::default()
                })
            } else {
                Err(MscError::api_with_status(404, "Project not found"))
            }
        }

        async fn blog_posts(&self, _query: &ContentQuery) -> Result<Paginated<BlogPost>> {
            Ok(Paginated {
                data: Vec::new(),
                total: 0,
                page: 1,
                limit: 10,
                total_pages: 0,
            })
        }

        async fn blog_post_by_slug(&self, _slug: &str) -> Result<BlogPost> {
            Err(MscError::network("connection refused"))
        }
    }

    fn project(n: usize) -> Project {
        Project {
            id: n.to_string(),
            slug: format!("project-{}", n),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_projects_page_two_loaded() {
        let api = Arc::new(MockContentApi::default());
        *api.projects.lock().unwrap() = Some(Ok(Paginated {
            data: (1..=9).map(project).collect(),
            total: 27,
            page: 2,
            limit: 9,
            total_pages: 3,
        }));
        let loader = ProjectsLoader::projects(api.clone());

        let view = loader.load(ContentQuery::page(2, 9)).await;

        assert_eq!(view.state.items().len(), 9);
        let page = view.page.unwrap();
        assert_eq!(page.page, 2);
        assert!(page.has_next());
        assert_eq!(
            api.queries.lock().unwrap()[0].to_pairs(),
            vec![("page", "2".to_string()), ("limit", "9".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_programs_is_empty() {
        let loader = ProgramsLoader::programs(Arc::new(MockContentApi::default()));
        let view = loader.load(()).await;
        assert_eq!(view.state, ViewState::Empty);
    }

    #[tokio::test]
    async fn test_empty_blog_page_is_empty_with_page_info() {
        let loader = BlogPostsLoader::blog_posts(Arc::new(MockContentApi::default()));
        let view = loader.load(ContentQuery::default()).await;
        assert_eq!(view.state, ViewState::Empty);
        assert_eq!(view.page.map(|p| p.total), Some(0));
    }

    #[tokio::test]
    async fn test_projects_network_error_then_retry() {
        let api = Arc::new(MockContentApi::default());
        let loader = ProjectsLoader::projects(api.clone());
        let query = ContentQuery::page(1, 9).with_category("ai");

        let view = loader.load(query.clone()).await;
        assert!(view.state.error().is_some_and(|m| !m.is_empty()));

        *api.projects.lock().unwrap() = Some(Ok(Paginated {
            data: vec![project(1)],
            total: 1,
            page: 1,
            limit: 9,
            total_pages: 1,
        }));
        let view = loader.retry().await;

        assert_eq!(view.state.items().len(), 1);
        let queries = api.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1], query);
    }

    #[tokio::test]
    async fn test_retry_before_load_does_nothing() {
        let api = Arc::new(MockContentApi::default());
        let loader = ProjectsLoader::projects(api.clone());

        let view = loader.retry().await;

        assert!(view.state.is_loading());
        assert_eq!(view.generation, 0);
        assert!(api.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_project_detail_found_and_missing() {
        let loader = ProjectDetailLoader::project(Arc::new(MockContentApi::default()));

        let view = loader.load("ai-bootcamp".to_string()).await;
        assert_eq!(view.state.items()[0].title, "AI Bootcamp");

        let view = loader.load("missing".to_string()).await;
        assert_eq!(view.state, ViewState::Failed("Project not found".to_string()));
    }

    #[tokio::test]
    async fn test_blog_post_detail_network_failure() {
        let loader = BlogPostDetailLoader::blog_post(Arc::new(MockContentApi::default()));
        let view = loader.load("hello".to_string()).await;
        assert!(matches!(view.state, ViewState::Failed(ref m) if !m.is_empty()));
    }
}
