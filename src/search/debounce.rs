//! The search box: input gating, debounce, and result sequencing.

use super::aggregator::SearchAggregator;
use super::matching::SearchResult;
use super::source::SearchSource;
use crate::config::SearchConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// What the dropdown renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub open: bool,
    pub loading: bool,
    /// Set when the last search failed; results are empty in that case.
    pub error: Option<String>,
}

struct Inner<S> {
    aggregator: SearchAggregator<S>,
    config: SearchConfig,
    state: watch::Sender<SearchState>,
    pending: Mutex<Option<CancellationToken>>,
    /// Sequence number of the newest search allowed to publish.
    latest: AtomicU64,
}

/// Debounced search over a [`SearchSource`].
///
/// Each keystroke goes through [`SearchBox::input`]. Queries shorter than the
/// configured minimum clear the dropdown without touching the network;
/// longer ones run once input has been quiet for the debounce interval.
/// Only the newest search may publish results, so a slow earlier request
/// can never overwrite a later one.
///
/// Handles are cheap to clone and share one state. `input` spawns onto the
/// current tokio runtime.
pub struct SearchBox<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for SearchBox<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SearchSource> SearchBox<S> {
    pub fn new(source: S, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                aggregator: SearchAggregator::new(source, config.per_category_limit),
                config,
                state,
                pending: Mutex::new(None),
                latest: AtomicU64::new(0),
            }),
        }
    }

    pub fn aggregator(&self) -> &SearchAggregator<S> {
        &self.inner.aggregator
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Record a new input value.
    pub fn input(&self, text: &str) {
        let inner = &self.inner;
        inner.state.send_modify(|state| state.query = text.to_string());
        inner.cancel_pending();

        let Some(query) = inner.searchable(text) else {
            inner.invalidate();
            inner.state.send_modify(|state| {
                state.results.clear();
                state.open = false;
                state.loading = false;
                state.error = None;
            });
            return;
        };

        let token = CancellationToken::new();
        *inner.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());

        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::trace!(query = %query, "Debounced search superseded");
                    return;
                }
                () = tokio::time::sleep(inner.config.debounce) => {}
            }
            inner.execute(query).await;
        });
    }

    /// Run the current query now instead of waiting out the debounce.
    ///
    /// Does nothing when the query is below the minimum length.
    pub async fn flush(&self) {
        let inner = &self.inner;
        inner.cancel_pending();
        let query = inner.state.borrow().query.clone();
        if let Some(query) = inner.searchable(&query) {
            inner.execute(query).await;
        }
    }

    /// Dismiss the dropdown. Any search still in flight is dropped on arrival.
    pub fn close(&self) {
        self.inner.cancel_pending();
        self.inner.invalidate();
        self.inner.state.send_modify(|state| {
            state.open = false;
            state.loading = false;
        });
    }
}

impl<S: SearchSource> Inner<S> {
    fn searchable(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        (trimmed.chars().count() >= self.config.min_query_chars).then(|| trimmed.to_string())
    }

    fn cancel_pending(&self) {
        if let Some(token) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }

    fn invalidate(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn execute(&self, query: String) {
        let seq = self.invalidate();
        self.state.send_modify(|state| state.loading = true);

        let outcome = self.aggregator.search(&query).await;

        // Checked under the channel lock so a newer search publishing at the
        // same moment cannot be overwritten.
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq {
                tracing::debug!(query = %query, seq, "Discarding stale search results");
                return false;
            }
            state.loading = false;
            state.open = true;
            match outcome {
                Ok(results) => {
                    state.results = results;
                    state.error = None;
                }
                Err(e) => {
                    tracing::warn!(query = %query, "Search failed: {}", e);
                    state.results.clear();
                    state.error = Some(e.to_string());
                }
            }
            true
        });
    }
}
