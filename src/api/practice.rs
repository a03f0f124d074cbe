//! Practice sessions and the mistakes notebook.

use super::ApiClient;
use super::models::{
    AnswerAttempt, MistakeQuestion, PracticeSession, PracticeSessionRequest, Question,
};
use crate::error::ApiError;

impl ApiClient {
    pub async fn start_practice_session(
        &self,
        request: &PracticeSessionRequest,
    ) -> Result<PracticeSession, ApiError> {
        self.post("/api/practice/session", request).await
    }

    pub async fn record_attempt(&self, attempt: &AnswerAttempt) -> Result<(), ApiError> {
        self.post("/api/practice/attempt", attempt).await
    }

    /// Ids of questions the user last answered incorrectly.
    pub async fn mistakes(&self) -> Result<Vec<String>, ApiError> {
        self.get("/api/practice/mistakes").await
    }

    pub async fn mistake_details(&self) -> Result<Vec<MistakeQuestion>, ApiError> {
        self.get("/api/practice/mistakes/details").await
    }

    /// Full questions behind the mistakes, optionally limited to one topic.
    pub async fn mistake_questions(
        &self,
        topic_id: Option<&str>,
    ) -> Result<Vec<Question>, ApiError> {
        match topic_id {
            Some(topic_id) => {
                self.get_query(
                    "/api/practice/mistakes/questions",
                    &[("topicId", topic_id.to_string())],
                )
                .await
            }
            None => self.get("/api/practice/mistakes/questions/all").await,
        }
    }

    /// Start a practice session made of past mistakes.
    pub async fn start_mistake_session(
        &self,
        topic_id: Option<&str>,
    ) -> Result<PracticeSession, ApiError> {
        match topic_id {
            Some(topic_id) => {
                let query = [("topicId", topic_id.to_string())];
                self.send(
                    reqwest::Method::POST,
                    "/api/practice/mistakes/session",
                    super::Auth::Stored,
                    |req| req.query(&query),
                )
                .await
            }
            None => self.post_empty("/api/practice/mistakes/session/all").await,
        }
    }
}
