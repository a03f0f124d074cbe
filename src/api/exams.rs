//! Mock exam endpoints.

use super::models::{ExamAnswer, ExamSession, ExamSessionQuestion, ExamSubmitResult, MockExam};
use super::{ApiClient, encode_segment};
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_exams(&self) -> Result<Vec<MockExam>, ApiError> {
        self.get("/api/exams").await
    }

    pub async fn start_exam_session(&self, exam_id: &str) -> Result<ExamSession, ApiError> {
        let path = format!("/api/exams/{}/session", encode_segment(exam_id));
        self.post_empty(&path).await
    }

    pub async fn exam_session_questions(
        &self,
        session_id: &str,
    ) -> Result<Vec<ExamSessionQuestion>, ApiError> {
        let path = format!("/api/exams/session/{}/questions", encode_segment(session_id));
        self.get(&path).await
    }

    pub async fn record_exam_answer(
        &self,
        session_id: &str,
        answer: &ExamAnswer,
    ) -> Result<(), ApiError> {
        let path = format!("/api/exams/session/{}/answer", encode_segment(session_id));
        self.post(&path, answer).await
    }

    pub async fn submit_exam(&self, session_id: &str) -> Result<ExamSubmitResult, ApiError> {
        let path = format!("/api/exams/session/{}/submit", encode_segment(session_id));
        self.post_empty(&path).await
    }
}
