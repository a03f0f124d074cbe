//! REST backend access.
//!
//! [`ApiClient`] is the uniform fetch wrapper every call goes through: it
//! attaches the stored bearer token, serializes JSON bodies, turns non-2xx
//! responses into [`ApiError::Http`] and treats 204 (or an empty body) as an
//! empty success. The endpoint groups live in the submodules as further
//! `impl ApiClient` blocks.

pub mod models;

mod analytics;
mod auth;
mod content;
mod exams;
mod generation;
mod lessons;
mod practice;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::storage::TokenStore;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Which credential goes into the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// The stored access token, if any.
    Stored,
    /// An explicit token (the refresh endpoints take the refresh token).
    Token(&'a str),
}

/// HTTP client for the exam-prep backend.
///
/// Cloning is cheap; clones share the connection pool and the token store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: Url, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig, tokens: TokenStore) -> Self {
        Self::new(config.api_base_url.clone(), tokens)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Absolute URL for a request path such as `/api/topics`.
    ///
    /// The path is appended to the base URL verbatim, so a base with a path
    /// prefix (`https://host/backend`) keeps it.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|source| ApiError::Url {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, Auth::Stored, |req| req).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, Auth::Stored, |req| {
            if query.is_empty() {
                req
            } else {
                req.query(query)
            }
        })
        .await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Auth::Stored, |req| req.json(body))
            .await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, Auth::Stored, |req| req).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, Auth::Stored, |req| req.json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, Auth::Stored, |req| req).await
    }

    /// Issue one request and decode the response.
    ///
    /// `configure` adds the body or query string. A 204 or empty body decodes
    /// as JSON `null`, which satisfies `()` and `Option<_>` targets.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let mut request = self.http.request(method.clone(), url);

        let token = match auth {
            Auth::Stored => self.tokens.access_token(),
            Auth::Token(token) => Some(token.to_string()),
        };
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = configure(request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        tracing::debug!(%method, path, status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }

        decode_body(path, status, &body)
    }
}

fn decode_body<T: DeserializeOwned>(
    path: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ApiError> {
    let raw = if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        "null"
    } else {
        body
    };
    serde_json::from_str(raw).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// RFC 3986 unreserved characters; everything else in an id is escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
