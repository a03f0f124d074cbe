//! Global search across topics, flashcards and questions.
//!
//! [`SearchAggregator`] runs a single query. [`SearchBox`] wraps it with the
//! input handling the dropdown needs: a minimum query length, a debounce,
//! and sequencing so only the newest query's results are shown.

mod aggregator;
mod debounce;
mod matching;
mod source;

pub use aggregator::SearchAggregator;
pub use debounce::{SearchBox, SearchState};
pub use matching::{ResultKind, SearchResult, grouped};
pub use source::SearchSource;
