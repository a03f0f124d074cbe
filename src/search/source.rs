//! Where the aggregator gets its collections from.

use crate::api::ApiClient;
use crate::api::models::{Flashcard, Question, QuestionSearchParams, Topic};
use crate::error::ApiError;
use futures::future::BoxFuture;
use std::sync::Arc;

/// The three collections the search box reads.
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory source.
pub trait SearchSource: Send + Sync + 'static {
    fn topics(&self) -> BoxFuture<'_, Result<Vec<Topic>, ApiError>>;

    fn flashcards(&self) -> BoxFuture<'_, Result<Vec<Flashcard>, ApiError>>;

    /// Questions matching `query`, filtered by the backend.
    fn questions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Question>, ApiError>>;
}

impl SearchSource for ApiClient {
    fn topics(&self) -> BoxFuture<'_, Result<Vec<Topic>, ApiError>> {
        Box::pin(self.list_topics())
    }

    fn flashcards(&self) -> BoxFuture<'_, Result<Vec<Flashcard>, ApiError>> {
        Box::pin(self.list_flashcards())
    }

    fn questions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Question>, ApiError>> {
        Box::pin(async move {
            self.search_questions(&QuestionSearchParams::with_query(query))
                .await
        })
    }
}

impl<T: SearchSource + ?Sized> SearchSource for Arc<T> {
    fn topics(&self) -> BoxFuture<'_, Result<Vec<Topic>, ApiError>> {
        (**self).topics()
    }

    fn flashcards(&self) -> BoxFuture<'_, Result<Vec<Flashcard>, ApiError>> {
        (**self).flashcards()
    }

    fn questions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Question>, ApiError>> {
        (**self).questions(query)
    }
}
