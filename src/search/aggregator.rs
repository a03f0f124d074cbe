//! One search execution across topics, flashcards and questions.

use super::matching::{SearchResult, match_flashcards, match_topics, take_questions};
use super::source::SearchSource;
use crate::api::models::{Flashcard, Topic};
use crate::error::ApiError;
use tokio::sync::OnceCell;

/// Runs queries against a [`SearchSource`], caching the topic and flashcard
/// collections for its own lifetime.
///
/// Each cache is filled by the first successful fetch and never refreshed.
/// Concurrent first queries share a single fetch; a failed fetch leaves the
/// cache empty so the next query tries again.
pub struct SearchAggregator<S> {
    source: S,
    topics: OnceCell<Vec<Topic>>,
    flashcards: OnceCell<Vec<Flashcard>>,
    per_category_limit: usize,
}

impl<S> std::fmt::Debug for SearchAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("topics_cached", &self.topics.get().map(Vec::len))
            .field("flashcards_cached", &self.flashcards.get().map(Vec::len))
            .field("per_category_limit", &self.per_category_limit)
            .finish()
    }
}

impl<S: SearchSource> SearchAggregator<S> {
    pub fn new(source: S, per_category_limit: usize) -> Self {
        Self {
            source,
            topics: OnceCell::new(),
            flashcards: OnceCell::new(),
            per_category_limit,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn topics_cached(&self) -> bool {
        self.topics.initialized()
    }

    pub fn flashcards_cached(&self) -> bool {
        self.flashcards.initialized()
    }

    /// Execute `query` once: no length gate, no debounce.
    ///
    /// Results are grouped topics, then flashcards, then questions, each
    /// capped at the per-category limit. Any failed fetch fails the whole
    /// search.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let query = query.trim();
        let (topics, flashcards, questions) = futures::try_join!(
            self.topics.get_or_try_init(|| self.source.topics()),
            self.flashcards.get_or_try_init(|| self.source.flashcards()),
            self.source.questions(query),
        )?;

        let needle = query.to_lowercase();
        let limit = self.per_category_limit;

        let mut results = match_topics(topics, &needle, limit);
        results.extend(match_flashcards(flashcards, &needle, limit));
        results.extend(take_questions(&questions, query, limit));

        tracing::debug!(query, results = results.len(), "Search executed");
        Ok(results)
    }
}
