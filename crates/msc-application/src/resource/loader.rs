use msc_core::content::PageInfo;
use msc_core::error::{MscError, Result};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Phase of a resource view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What a view renders: the phase plus pagination of the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView<T> {
    pub state: ViewState<T>,
    /// Present after a successful paginated fetch.
    pub page: Option<PageInfo>,
    /// Fetch that produced this view. Zero before the first fetch.
    pub generation: u64,
}

/// Successful fetch result, before it is turned into a view.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub page: Option<PageInfo>,
}

impl<T> Fetched<T> {
    pub fn items(items: Vec<T>) -> Self {
        Self { items, page: None }
    }

    pub fn page(items: Vec<T>, page: PageInfo) -> Self {
        Self {
            items,
            page: Some(page),
        }
    }
}

/// Holds the view of one resource and guards it against stale fetches.
///
/// Each [`begin`](Self::begin) takes a new generation. A completion is
/// applied only while its generation is still the latest one.
pub struct ResourceLoader<T> {
    resource: &'static str,
    latest: AtomicU64,
    view: watch::Sender<ResourceView<T>>,
}

impl<T> ResourceLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// `resource` names the content in fallback error messages.
    pub fn new(resource: &'static str) -> Self {
        let (view, _) = watch::channel(ResourceView {
            state: ViewState::Loading,
            page: None,
            generation: 0,
        });
        Self {
            resource,
            latest: AtomicU64::new(0),
            view,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn view(&self) -> ResourceView<T> {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceView<T>> {
        self.view.subscribe()
    }

    /// Starts a fetch: resets the view to `Loading` and returns its generation.
    pub fn begin(&self) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.send_if_modified(|view| {
            if generation <= view.generation {
                return false;
            }
            view.state = ViewState::Loading;
            view.page = None;
            view.generation = generation;
            true
        });
        generation
    }

    /// Applies the outcome of fetch `generation`.
    ///
    /// Returns false, leaving the view alone, when a newer fetch has started.
    pub fn complete(&self, generation: u64, result: Result<Fetched<T>>) -> bool {
        let resource = self.resource;
        let applied = self.view.send_if_modified(|view| {
            if view.generation != generation {
                return false;
            }
            match result {
                Ok(fetched) if fetched.items.is_empty() => {
                    view.state = ViewState::Empty;
                    view.page = fetched.page;
                }
                Ok(fetched) => {
                    view.state = ViewState::Loaded(fetched.items);
                    view.page = fetched.page;
                }
                Err(e) => {
                    tracing::warn!("[ResourceLoader] Failed to fetch {}: {}", resource, e);
                    view.state = ViewState::Failed(failure_message(&e, resource));
                    view.page = None;
                }
            }
            true
        });
        if !applied {
            tracing::debug!(
                "[ResourceLoader] Discarded stale {} fetch #{}",
                resource,
                generation
            );
        }
        applied
    }

    /// Runs `fetch` as a new generation and returns the resulting view.
    ///
    /// The view is `Loading` before `fetch` is first polled.
    pub async fn run<F>(&self, fetch: F) -> ResourceView<T>
    where
        F: Future<Output = Result<Fetched<T>>>,
    {
        let generation = self.begin();
        let result = fetch.await;
        self.complete(generation, result);
        self.view()
    }
}

/// Message shown for a failed fetch.
fn failure_message(error: &MscError, resource: &str) -> String {
    match error {
        MscError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        MscError::Network(_) => error.to_string(),
        _ => format!("Failed to fetch {}", resource),
    }
}
