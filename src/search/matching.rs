//! Result construction and client-side matching.

use crate::api::models::{Flashcard, Question, Topic};
use serde::Serialize;
use std::fmt;

/// Which collection a suggestion came from. Also the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Topic,
    Flashcard,
    Question,
}

impl ResultKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Topic => "Topics",
            Self::Flashcard => "Flashcards",
            Self::Question => "Questions",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topic => "topic",
            Self::Flashcard => "flashcard",
            Self::Question => "question",
        })
    }
}

/// One row of the search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub subtitle: String,
    /// In-app route the row navigates to.
    pub href: String,
}

impl SearchResult {
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            kind: ResultKind::Topic,
            title: topic.name.clone(),
            subtitle: "Topic".to_string(),
            href: format!("/dashboard/questions/bank?topicId={}", encode(&topic.id)),
        }
    }

    pub fn from_flashcard(card: &Flashcard) -> Self {
        let href = match card.topic_id.as_deref() {
            Some(topic_id) => format!("/dashboard/study/flashcards?topic={}", encode(topic_id)),
            None => "/dashboard/study/flashcards".to_string(),
        };
        Self {
            id: card.id.clone(),
            kind: ResultKind::Flashcard,
            title: card.front.clone(),
            subtitle: card
                .topic_name
                .clone()
                .unwrap_or_else(|| "Flashcard".to_string()),
            href,
        }
    }

    /// `query` is what the user searched; the bank page re-runs it.
    pub fn from_question(question: &Question, query: &str) -> Self {
        Self {
            id: question.id.clone(),
            kind: ResultKind::Question,
            title: question.text.clone(),
            subtitle: question
                .topic_name
                .clone()
                .unwrap_or_else(|| question.difficulty.to_string()),
            href: format!("/dashboard/questions/bank?query={}", encode(query)),
        }
    }
}

/// Topics whose name contains `needle` (already lower-cased), first `limit` kept.
pub fn match_topics(topics: &[Topic], needle: &str, limit: usize) -> Vec<SearchResult> {
    topics
        .iter()
        .filter(|topic| topic.name.to_lowercase().contains(needle))
        .take(limit)
        .map(SearchResult::from_topic)
        .collect()
}

/// Flashcards whose `front back` text contains `needle` (already lower-cased).
pub fn match_flashcards(cards: &[Flashcard], needle: &str, limit: usize) -> Vec<SearchResult> {
    cards
        .iter()
        .filter(|card| {
            format!("{} {}", card.front, card.back)
                .to_lowercase()
                .contains(needle)
        })
        .take(limit)
        .map(SearchResult::from_flashcard)
        .collect()
}

/// Questions are filtered server-side; only the cap applies here.
pub fn take_questions(questions: &[Question], query: &str, limit: usize) -> Vec<SearchResult> {
    questions
        .iter()
        .take(limit)
        .map(|q| SearchResult::from_question(q, query))
        .collect()
}

/// Split a flat result list into its categories, in display order.
pub fn grouped(results: &[SearchResult]) -> Vec<(ResultKind, Vec<&SearchResult>)> {
    let mut groups: Vec<(ResultKind, Vec<&SearchResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(kind, _)| *kind == result.kind) {
            Some((_, items)) => items.push(result),
            None => groups.push((result.kind, vec![result])),
        }
    }
    groups.sort_by_key(|(kind, _)| *kind);
    groups
}

fn encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
