//! Authentication and profile endpoints.

use super::models::{
    AuthResponse, LoginRequest, OAuthCodeRequest, RegisterRequest, UpdateProfileRequest, User,
};
use super::{ApiClient, Auth};
use crate::error::ApiError;
use crate::oauth::OAuthProvider;
use reqwest::Method;

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post("/api/auth/login", &LoginRequest { email, password })
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("/api/auth/register", request).await
    }

    /// Trade a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        self.send(
            Method::POST,
            "/api/auth/refresh",
            Auth::Token(refresh_token),
            |req| req,
        )
        .await
    }

    /// Revoke a refresh token server-side.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.send(
            Method::POST,
            "/api/auth/logout",
            Auth::Token(refresh_token),
            |req| req,
        )
        .await
    }

    /// Exchange an OAuth authorization code for a token pair.
    pub async fn oauth_exchange(
        &self,
        provider: OAuthProvider,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AuthResponse, ApiError> {
        let path = format!("/api/auth/oauth/{}", provider.as_str());
        self.post(&path, &OAuthCodeRequest { code, redirect_uri })
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/api/me").await
    }

    pub async fn update_me(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        self.patch("/api/me", request).await
    }
}
