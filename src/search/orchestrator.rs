//! Paginated search orchestrator driving one list view.
//!
//! The orchestrator owns the list's [`FilterState`] and [`ResultStore`].
//! Views dispatch [`FilterAction`]s and subscribe to the store; the
//! orchestrator debounces the changes, builds the request from the state
//! current when the window closes, fetches it and projects the response.
//!
//! In-flight requests are never cancelled. With
//! [`StaleResponsePolicy::Apply`] every response is written to the store as
//! it arrives, so the last one to arrive wins. [`StaleResponsePolicy::Discard`]
//! stamps each request with a generation and drops responses that were
//! overtaken by a newer request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::config::ClientConfig;
use crate::repository::errors::RepositoryResult;
use crate::search::request::{SearchFilters, SearchRequest, SearchResult, build_request};
use crate::search::state::{FilterAction, FilterState};
use crate::search::store::ResultStore;
use crate::search::trigger::{DEFAULT_DEBOUNCE, DebouncedTrigger};
use crate::services::notifications::{MSG_SEARCH_FAILED, Notification, Notifier};

/// Backend search endpoint feeding a list.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Send + 'static;

    async fn fetch(&self, request: SearchRequest) -> RepositoryResult<SearchResult<Self::Item>>;
}

/// What to do with a response that arrives after a newer request was issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaleResponsePolicy {
    /// Write every response to the store (last to arrive wins).
    #[default]
    Apply,
    /// Drop responses whose request is no longer the latest.
    Discard,
}

#[derive(Clone)]
pub struct OrchestratorOptions {
    pub debounce: Duration,
    pub stale_responses: StaleResponsePolicy,
    /// Receives a notification when a search fails. List views usually leave
    /// this unset and simply show the empty page.
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            stale_responses: StaleResponsePolicy::default(),
            notifier: None,
        }
    }
}

impl OrchestratorOptions {
    /// Options using the configured debounce window.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            debounce: config.debounce(),
            ..Self::default()
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

struct Fetcher<S: ListSource, R> {
    source: Arc<S>,
    store: Arc<watch::Sender<ResultStore<R>>>,
    generation: Arc<AtomicU64>,
    policy: StaleResponsePolicy,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<S, R> Fetcher<S, R>
where
    S: ListSource,
    R: From<S::Item> + Send + Sync + 'static,
{
    fn start<F: SearchFilters>(&self, state: &FilterState<F>) {
        let request = build_request(state);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        log::debug!(
            "Search #{generation}: page {} size {} text {:?}",
            request.page,
            request.page_size,
            request.search_text
        );
        self.store.send_modify(ResultStore::begin_loading);

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let latest = Arc::clone(&self.generation);
        let policy = self.policy;
        let notifier = self.notifier.clone();

        tokio::spawn(async move {
            let outcome = source.fetch(request).await;

            if policy == StaleResponsePolicy::Discard
                && latest.load(Ordering::SeqCst) != generation
            {
                log::debug!("Search #{generation}: discarding stale response");
                return;
            }

            match outcome {
                Ok(page) => {
                    let page = page.map(R::from);
                    log::debug!(
                        "Search #{generation}: {} of {} results",
                        page.results.len(),
                        page.total
                    );
                    store.send_modify(|current| current.apply_success(page));
                }
                Err(err) => {
                    log::warn!("Search #{generation} failed: {err}");
                    store.send_modify(ResultStore::apply_failure);
                    if let Some(notifier) = notifier {
                        notifier.notify(Notification::error(MSG_SEARCH_FAILED));
                    }
                }
            }
        });
    }
}

/// Handle owned by a list view. Dropping it stops the debounce loop.
pub struct SearchOrchestrator<F, R> {
    state: Arc<watch::Sender<FilterState<F>>>,
    store: Arc<watch::Sender<ResultStore<R>>>,
    generation: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl<F, R> SearchOrchestrator<F, R>
where
    F: SearchFilters,
    R: Send + Sync + 'static,
{
    /// Starts the orchestrator and immediately loads the first page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(source: S, initial: FilterState<F>, options: OrchestratorOptions) -> Self
    where
        S: ListSource,
        R: From<S::Item>,
    {
        let (state, state_rx) = watch::channel(initial);
        let (store, _) = watch::channel(ResultStore::new());
        let state = Arc::new(state);
        let store = Arc::new(store);
        let generation = Arc::new(AtomicU64::new(0));

        let fetcher = Fetcher {
            source: Arc::new(source),
            store: Arc::clone(&store),
            generation: Arc::clone(&generation),
            policy: options.stale_responses,
            notifier: options.notifier,
        };

        let mut trigger = DebouncedTrigger::new(state_rx, options.debounce);
        let first = state.borrow().clone();

        let task = tokio::spawn(async move {
            fetcher.start(&first);
            while let Some(current) = trigger.settled().await {
                fetcher.start(&current);
            }
            log::debug!("Search trigger closed");
        });

        Self {
            state,
            store,
            generation,
            task,
        }
    }

    /// Applies `action` to the filter state and schedules a search.
    pub fn dispatch(&self, action: FilterAction<F>) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.apply(action);
        });
    }

    /// Schedules a search with the current state unchanged.
    pub fn refresh(&self) {
        self.state.send_modify(|_| {});
    }

    pub fn state(&self) -> FilterState<F> {
        self.state.borrow().clone()
    }

    /// Current request for the list, e.g. to download the same selection.
    pub fn current_request(&self) -> SearchRequest {
        build_request(&self.state.borrow())
    }

    pub fn results(&self) -> ResultStore<R>
    where
        R: Clone,
    {
        self.store.borrow().clone()
    }

    /// Receiver notified every time the store changes.
    pub fn subscribe(&self) -> watch::Receiver<ResultStore<R>> {
        self.store.subscribe()
    }

    /// Number of searches issued so far.
    pub fn searches_issued(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl<F, R> Drop for SearchOrchestrator<F, R> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(debounce_ms: u64) -> ClientConfig {
        ClientConfig {
            api_url: "http://localhost:8080/api".into(),
            token: None,
            debounce_ms,
            page_size: 10,
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn options_take_debounce_from_config() {
        let options = OrchestratorOptions::from_config(&config(250));

        assert_eq!(options.debounce, Duration::from_millis(250));
        assert_eq!(options.stale_responses, StaleResponsePolicy::Apply);
        assert!(options.notifier.is_none());
    }

    #[test]
    fn default_options_use_default_debounce() {
        assert_eq!(OrchestratorOptions::default().debounce, DEFAULT_DEBOUNCE);
        assert_eq!(config(400).debounce(), DEFAULT_DEBOUNCE);
    }
}
