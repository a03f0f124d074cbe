//! Analytics endpoints.
//!
//! Overview and readiness are computed server-side and their shape is owned
//! by the backend, so they are passed through as JSON.

use super::ApiClient;
use super::models::{AccuracyTrend, TopicMastery};
use crate::error::ApiError;
use serde_json::Value;

impl ApiClient {
    pub async fn analytics_overview(&self) -> Result<Value, ApiError> {
        self.get("/api/analytics/overview").await
    }

    pub async fn topic_mastery(&self) -> Result<TopicMastery, ApiError> {
        self.get("/api/analytics/topic-mastery").await
    }

    pub async fn readiness(&self) -> Result<Value, ApiError> {
        self.get("/api/analytics/readiness").await
    }

    pub async fn accuracy_trend(&self) -> Result<AccuracyTrend, ApiError> {
        self.get("/api/analytics/accuracy-trend").await
    }
}
