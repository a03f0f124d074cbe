//! Topics, flashcards and the question bank.

use super::models::{
    Confidence, Flashcard, FlashcardDraft, Question, QuestionDraft, QuestionSearchParams, Topic,
    TopicColor, TopicCreateRequest,
};
use super::{ApiClient, encode_segment};
use crate::error::ApiError;
use serde::Serialize;

#[derive(Serialize)]
struct WeakToggle {
    weak: bool,
}

#[derive(Serialize)]
struct FlashcardReview {
    confidence: Confidence,
}

impl ApiClient {
    pub async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        self.get("/api/topics").await
    }

    pub async fn create_topic(
        &self,
        name: &str,
        color: Option<TopicColor>,
    ) -> Result<Topic, ApiError> {
        self.post("/api/topics", &TopicCreateRequest { name, color })
            .await
    }

    /// Mark a topic as weak (or clear the flag).
    pub async fn set_topic_weak(&self, topic_id: &str, weak: bool) -> Result<Topic, ApiError> {
        let path = format!("/api/topics/{}/weak", encode_segment(topic_id));
        self.patch(&path, &WeakToggle { weak }).await
    }

    pub async fn list_flashcards(&self) -> Result<Vec<Flashcard>, ApiError> {
        self.get("/api/flashcards").await
    }

    pub async fn create_flashcard(&self, draft: &FlashcardDraft) -> Result<Flashcard, ApiError> {
        self.post("/api/flashcards", draft).await
    }

    pub async fn update_flashcard(
        &self,
        flashcard_id: &str,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError> {
        let path = format!("/api/flashcards/{}", encode_segment(flashcard_id));
        self.patch(&path, draft).await
    }

    pub async fn delete_flashcard(&self, flashcard_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/flashcards/{}", encode_segment(flashcard_id));
        self.delete(&path).await
    }

    /// Record a self-assessed recall; the backend reschedules the card.
    pub async fn review_flashcard(
        &self,
        flashcard_id: &str,
        confidence: Confidence,
    ) -> Result<Flashcard, ApiError> {
        let path = format!("/api/flashcards/{}/review", encode_segment(flashcard_id));
        self.post(&path, &FlashcardReview { confidence }).await
    }

    /// Server-side filtered question search.
    pub async fn search_questions(
        &self,
        params: &QuestionSearchParams,
    ) -> Result<Vec<Question>, ApiError> {
        self.get_query("/api/questions", &params.to_pairs()).await
    }

    pub async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError> {
        self.post("/api/questions", draft).await
    }

    pub async fn bulk_create_questions(
        &self,
        drafts: &[QuestionDraft],
    ) -> Result<Vec<Question>, ApiError> {
        self.post("/api/questions/bulk", drafts).await
    }

    pub async fn update_question(
        &self,
        question_id: &str,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        let path = format!("/api/questions/{}", encode_segment(question_id));
        self.patch(&path, draft).await
    }

    pub async fn delete_question(&self, question_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/questions/{}", encode_segment(question_id));
        self.delete(&path).await
    }
}
