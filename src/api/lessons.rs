//! Lesson completion tracking.

use super::models::LessonProgress;
use super::{ApiClient, encode_segment};
use crate::error::ApiError;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonProgressRequest<'a> {
    topic_slug: &'a str,
    lesson_id: &'a str,
}

impl ApiClient {
    /// Completed lessons, optionally for one topic.
    pub async fn lesson_progress(
        &self,
        topic_slug: Option<&str>,
    ) -> Result<Vec<LessonProgress>, ApiError> {
        let query: Vec<(&str, String)> = topic_slug
            .filter(|slug| !slug.is_empty())
            .map(|slug| ("topicSlug", slug.to_string()))
            .into_iter()
            .collect();
        self.get_query("/api/lessons/progress", &query).await
    }

    pub async fn mark_lesson_complete(
        &self,
        topic_slug: &str,
        lesson_id: &str,
    ) -> Result<LessonProgress, ApiError> {
        self.post(
            "/api/lessons/progress",
            &LessonProgressRequest {
                topic_slug,
                lesson_id,
            },
        )
        .await
    }

    pub async fn delete_lesson_progress(&self, lesson_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/lessons/progress/{}", encode_segment(lesson_id));
        self.delete(&path).await
    }
}
