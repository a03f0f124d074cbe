//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - [`FakeBackend`]: an in-process axum server speaking the subset of the
//!   REST API the client tests touch. It records every request so tests can
//!   assert on paths and `Authorization` headers.
//! - [`FakeSource`]: an in-memory [`SearchSource`] that counts calls and can
//!   be told to fail or to delay individual queries.
//! - `workspace`: a [`TempWorkspace`] for on-disk token storage.

use axum::extract::{Query, Request, State};
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use blepp_client::api::models::{
    Difficulty, Flashcard, Question, QuestionSource, Topic, TopicColor,
};
use blepp_client::{ApiClient, ApiError, LocalStore, SearchSource, TokenStore};
use futures::future::BoxFuture;
use rstest::fixture;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use url::Url;

/// Password the fake backend accepts for any email.
#[allow(dead_code)]
pub const PASSWORD: &str = "correct-horse";

/// A temporary directory removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// A file-backed store at `storage.json` inside this workspace.
    pub fn store(&self) -> LocalStore {
        LocalStore::open(self.root.join("storage.json"))
            .unwrap_or_else(|e| panic!("Failed to open store: {:#}", e))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn workspace() -> TempWorkspace {
    TempWorkspace::new()
}

// --- Fake REST backend ---

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Axum server bound to an ephemeral localhost port for the life of the value.
#[allow(dead_code)]
pub struct FakeBackend {
    pub base_url: Url,
    recorder: Arc<Recorder>,
    task: JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub async fn start() -> Self {
        blepp_client::tracing::init(false);
        let recorder = Arc::new(Recorder::default());
        let app = router().layer(middleware::from_fn_with_state(
            Arc::clone(&recorder),
            record,
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Fake backend has no address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake backend stopped");
        });

        Self {
            base_url: Url::parse(&format!("http://{}", addr)).expect("valid fake backend url"),
            recorder,
            task,
        }
    }

    /// A client for this backend over `store`.
    pub fn client(&self, store: LocalStore) -> ApiClient {
        ApiClient::new(self.base_url.clone(), TokenStore::new(store))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder
            .requests
            .lock()
            .expect("recorder poisoned")
            .clone()
    }

    /// Requests made to `path`, ignoring the query string.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record(State(recorder): State<Arc<Recorder>>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        content_type: request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };
    recorder
        .requests
        .lock()
        .expect("recorder poisoned")
        .push(recorded);
    next.run(request).await
}

fn router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(|| async { Json(tokens(1)) }))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(|| async { StatusCode::NO_CONTENT }))
        .route("/api/me", get(me))
        .route("/api/topics", get(|| async { Json(topics_json()) }))
        .route("/api/flashcards", get(|| async { Json(flashcards_json()) }))
        .route("/api/flashcards/{id}", delete(|| async { StatusCode::NO_CONTENT }))
        .route("/api/questions", get(questions))
        .route("/api/generation/upload", post(upload))
        .route(
            "/api/lessons/progress/{id}",
            delete(|| async { (StatusCode::OK, "") }),
        )
        .route(
            "/api/exams",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/api/analytics/readiness",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Analytics warming up") }),
        )
}

fn tokens(generation: u32) -> Value {
    json!({
        "userId": "user-1",
        "accessToken": format!("access-{}", generation),
        "refreshToken": format!("refresh-{}", generation),
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(tokens(1)).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
    }
}

async fn refresh(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some("refresh-1") => Json(tokens(2)).into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn me(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some("access-1" | "access-2") => Json(json!({
            "id": "user-1",
            "email": "ana@example.com",
            "fullName": "Ana Reyes",
            "targetExamDate": "2026-12-05",
            "dailyStudyHours": 3,
        }))
        .into_response(),
        _ => (StatusCode::UNAUTHORIZED, "Invalid token").into_response(),
    }
}

/// Accepts a multipart body whose `file` part is a named PDF.
async fn upload(body: Bytes) -> Response {
    let body = String::from_utf8_lossy(&body);
    let has_pdf_part = body.contains("name=\"file\"")
        && body.contains("filename=\"notes.pdf\"")
        && body.contains("application/pdf")
        && body.contains("%PDF-1.4");
    if has_pdf_part {
        Json(json!({"uploadId": "u1"})).into_response()
    } else {
        (StatusCode::BAD_REQUEST, "PDF file is required.").into_response()
    }
}

async fn questions(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let needle = params
        .get("query")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let matching: Vec<Value> = questions_json()
        .as_array()
        .into_iter()
        .flatten()
        .filter(|q| {
            q["text"]
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    Json(Value::Array(matching))
}

#[allow(dead_code)]
pub fn topics_json() -> Value {
    json!([
        {"id": "t1", "name": "Developmental Psychology", "slug": "developmental", "color": "blue"},
        {"id": "t2", "name": "Industrial Psychology", "slug": "industrial", "color": "green", "weak": true},
        {"id": "t3", "name": "Abnormal Psychology", "slug": "abnormal", "color": "red"},
        {"id": "t4", "name": "Theories of Personality", "slug": "personality", "color": "purple"},
    ])
}

#[allow(dead_code)]
pub fn flashcards_json() -> Value {
    json!([
        {
            "id": "f1",
            "topicId": "t4",
            "topicName": "Theories of Personality",
            "front": "Id",
            "back": "Operates on Freud's pleasure principle",
        },
        {"id": "f2", "front": "Operant conditioning", "back": "Skinner"},
    ])
}

#[allow(dead_code)]
pub fn questions_json() -> Value {
    json!([
        {
            "id": "q1",
            "topicId": "t4",
            "topicName": "Theories of Personality",
            "text": "Which theorist proposed the psychosexual stages?",
            "choices": ["Freud", "Erikson", "Piaget", "Jung"],
            "correctAnswerIndex": 0,
            "difficulty": "MEDIUM",
            "source": "AI",
        },
        {
            "id": "q2",
            "topicId": "t1",
            "text": "Piaget's stages describe what kind of development?",
            "choices": ["Moral", "Cognitive"],
            "correctAnswerIndex": 1,
            "difficulty": "EASY",
            "source": "MANUAL",
        },
    ])
}

// --- In-memory search source ---

#[allow(dead_code)]
pub fn topic(id: &str, name: &str) -> Topic {
    Topic {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        color: TopicColor::Blue,
        weak: false,
        mastery_pct: None,
    }
}

#[allow(dead_code)]
pub fn flashcard(id: &str, front: &str, back: &str) -> Flashcard {
    Flashcard {
        id: id.to_string(),
        topic_id: None,
        topic_name: None,
        front: front.to_string(),
        back: back.to_string(),
        category: None,
        confidence: None,
        next_review: None,
    }
}

#[allow(dead_code)]
pub fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        topic_id: "t1".to_string(),
        topic_name: None,
        text: text.to_string(),
        choices: vec!["A".to_string(), "B".to_string()],
        correct_answer_index: 0,
        explanation: None,
        difficulty: Difficulty::Medium,
        source: QuestionSource::Manual,
        tags: Vec::new(),
        category: None,
        created_at: None,
    }
}

/// Counts calls per collection. Questions are "filtered" by substring like
/// the real backend.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeSource {
    pub topics: Vec<Topic>,
    pub flashcards: Vec<Flashcard>,
    pub questions: Vec<Question>,
    topic_calls: AtomicUsize,
    flashcard_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    fail: AtomicBool,
    delays: Mutex<HashMap<String, Duration>>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn new(topics: Vec<Topic>, flashcards: Vec<Flashcard>, questions: Vec<Question>) -> Self {
        blepp_client::tracing::init(false);
        Self {
            topics,
            flashcards,
            questions,
            ..Self::default()
        }
    }

    pub fn topic_calls(&self) -> usize {
        self.topic_calls.load(Ordering::SeqCst)
    }

    pub fn flashcard_calls(&self) -> usize {
        self.flashcard_calls.load(Ordering::SeqCst)
    }

    /// Queries sent to the question endpoint, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries poisoned").clone()
    }

    /// Make every subsequent call fail with a 500.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Hold the question response for `query` back by `delay`.
    pub fn delay_query(&self, query: &str, delay: Duration) {
        self.delays
            .lock()
            .expect("delays poisoned")
            .insert(query.to_string(), delay);
    }

    fn check_failing(&self) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(ApiError::from_status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                "backend unavailable",
            ))
        } else {
            Ok(())
        }
    }
}

impl SearchSource for FakeSource {
    fn topics(&self) -> BoxFuture<'_, Result<Vec<Topic>, ApiError>> {
        Box::pin(async move {
            self.topic_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.check_failing()?;
            Ok(self.topics.clone())
        })
    }

    fn flashcards(&self) -> BoxFuture<'_, Result<Vec<Flashcard>, ApiError>> {
        Box::pin(async move {
            self.flashcard_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.check_failing()?;
            Ok(self.flashcards.clone())
        })
    }

    fn questions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Question>, ApiError>> {
        Box::pin(async move {
            self.queries
                .lock()
                .expect("queries poisoned")
                .push(query.to_string());
            let delay = self
                .delays
                .lock()
                .expect("delays poisoned")
                .get(query)
                .copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.check_failing()?;
            let needle = query.to_lowercase();
            Ok(self
                .questions
                .iter()
                .filter(|q| q.text.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        })
    }
}
