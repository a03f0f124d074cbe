//! Wire types exchanged with the backend.
//!
//! Field names follow the backend's camelCase JSON. Enum values arrive
//! upper-case (`"EASY"`); the lower-case spelling is accepted too.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub target_exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub daily_study_hours: Option<u8>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_exam_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_study_hours: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCodeRequest<'a> {
    pub code: &'a str,
    pub redirect_uri: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_exam_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_study_hours: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Display colour of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicColor {
    Blue,
    Green,
    Amber,
    Red,
    Purple,
    #[default]
    Gray,
    /// Anything the client does not know how to render.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub color: TopicColor,
    #[serde(default)]
    pub weak: bool,
    #[serde(default)]
    pub mastery_pct: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicCreateRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TopicColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub next_review: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    pub front: String,
    pub back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
    #[serde(alias = "difficult")]
    Difficult,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Difficult => "difficult",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionSource {
    #[serde(alias = "pdf")]
    Pdf,
    #[serde(alias = "ai")]
    Ai,
    #[serde(alias = "manual")]
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub topic_id: String,
    #[serde(default)]
    pub topic_name: Option<String>,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or fully replacing a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub topic_id: String,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Filters for `GET /api/questions`. Empty fields are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSearchParams {
    pub query: Option<String>,
    pub topic_id: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub source: Option<QuestionSource>,
    pub tags: Vec<String>,
}

impl QuestionSearchParams {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Query pairs in the order the backend binds them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("query", query.to_string()));
        }
        if let Some(topic_id) = self.topic_id.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("topicId", topic_id.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", enum_wire_name(&difficulty)));
        }
        if let Some(source) = self.source {
            pairs.push(("source", enum_wire_name(&source)));
        }
        for tag in &self.tags {
            pairs.push(("tags", tag.clone()));
        }
        pairs
    }
}

/// The JSON string a unit enum serializes to.
fn enum_wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockExam {
    pub id: String,
    pub title: String,
    pub total_questions: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub id: String,
    pub exam_id: String,
    pub total_questions: u32,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSessionQuestion {
    pub question_id: String,
    pub text: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAnswer {
    pub question_id: String,
    pub selected_answer_index: Option<usize>,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubmitResult {
    pub session_id: String,
    pub score: u32,
    pub total_questions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    pub id: String,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
    pub question_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAttempt {
    pub session_id: String,
    pub question_id: String,
    pub selected_answer_index: usize,
    pub time_taken_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeQuestion {
    pub question_id: String,
    pub topic_id: String,
    pub topic_name: String,
    pub question_text: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub last_attempt_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMastery {
    pub topics: Vec<TopicMasteryStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMasteryStat {
    pub name: String,
    pub mastery_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyTrend {
    pub points: Vec<AccuracyPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyPoint {
    pub label: String,
    pub accuracy: u8,
    pub total: u32,
    pub correct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationUpload {
    #[serde(alias = "id", alias = "jobId")]
    pub upload_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRunRequest {
    pub upload_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenerationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRun {
    pub job_id: String,
    pub status: GenerationStatus,
    #[serde(default)]
    pub question_count: Option<u32>,
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJobStatus {
    pub job_id: String,
    pub status: GenerationStatus,
    #[serde(default)]
    pub question_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub id: String,
    pub topic_slug: String,
    pub lesson_id: String,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_question_from_backend_json() {
        let raw = json!({
            "id": "q1",
            "topicId": "t1",
            "topicName": "Developmental Psychology",
            "text": "Who proposed the stages of cognitive development?",
            "choices": ["Piaget", "Freud", "Skinner", "Erikson"],
            "correctAnswerIndex": 0,
            "explanation": null,
            "difficulty": "MEDIUM",
            "source": "MANUAL",
            "tags": ["theorists"],
            "createdAt": "2025-01-04T10:00:00Z"
        });

        let question: Question = serde_json::from_value(raw).unwrap();
        check!(question.difficulty == Difficulty::Medium);
        check!(question.source == QuestionSource::Manual);
        check!(question.topic_name.as_deref() == Some("Developmental Psychology"));
        check!(question.explanation.is_none());
        check!(question.category.is_none());
    }

    #[rstest]
    #[case("\"blue\"", TopicColor::Blue)]
    #[case("\"gray\"", TopicColor::Gray)]
    #[case("\"teal\"", TopicColor::Other)]
    fn test_topic_color(#[case] raw: &str, #[case] expected: TopicColor) {
        let color: TopicColor = serde_json::from_str(raw).unwrap();
        check!(color == expected);
    }

    #[rstest]
    #[case("\"HARD\"", Difficulty::Hard)]
    #[case("\"hard\"", Difficulty::Hard)]
    #[case("\"DIFFICULT\"", Difficulty::Difficult)]
    fn test_difficulty_accepts_both_cases(#[case] raw: &str, #[case] expected: Difficulty) {
        let difficulty: Difficulty = serde_json::from_str(raw).unwrap();
        check!(difficulty == expected);
    }

    #[test]
    fn test_topic_minimal_payload() {
        let topic: Topic = serde_json::from_value(json!({"id": "t", "name": "Abnormal"})).unwrap();
        check!(topic.color == TopicColor::Gray);
        check!(!topic.weak);
        check!(topic.mastery_pct.is_none());
    }

    #[test]
    fn test_register_request_omits_missing_optionals() {
        let request = RegisterRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
            full_name: "Maria Santos".into(),
            ..RegisterRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        check!(value == json!({"email": "a@b.c", "password": "pw", "fullName": "Maria Santos"}));
    }

    #[test]
    fn test_search_params_pairs() {
        let params = QuestionSearchParams {
            query: Some("piaget".into()),
            topic_id: Some(String::new()),
            difficulty: Some(Difficulty::Easy),
            source: None,
            tags: vec!["a".into(), "b".into()],
        };
        check!(
            params.to_pairs()
                == vec![
                    ("query", "piaget".to_string()),
                    ("difficulty", "EASY".to_string()),
                    ("tags", "a".to_string()),
                    ("tags", "b".to_string()),
                ]
        );
        check!(QuestionSearchParams::default().to_pairs().is_empty());
    }

    #[test]
    fn test_generation_upload_accepts_id_alias() {
        let_assert!(Ok(upload) = serde_json::from_value::<GenerationUpload>(json!({"id": "u1"})));
        check!(upload.upload_id == "u1");
    }
}
