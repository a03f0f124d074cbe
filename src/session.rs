//! Authentication session.
//!
//! Owns the signed-in user and keeps the token store in step with it: tokens
//! are written after every successful sign-in and cleared on logout or when
//! the stored token is rejected.

use crate::api::ApiClient;
use crate::api::models::{AuthResponse, User};
use crate::error::Result;
use crate::forms::{self, RegisterForm};
use crate::oauth::OAuthProvider;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Profile bootstrap has not finished.
    #[default]
    Loading,
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    api: ApiClient,
    state: AuthState,
}

impl Session {
    /// A session in the [`AuthState::Loading`] state; call [`Session::restore`] next.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: AuthState::Loading,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    pub const fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    /// Load the profile for a stored token.
    ///
    /// Without a token no request is made. A rejected or unreachable profile
    /// call clears the stored tokens.
    pub async fn restore(&mut self) -> Result<&AuthState> {
        if self.api.tokens().access_token().is_none() {
            self.state = AuthState::Anonymous;
            return Ok(&self.state);
        }

        match self.api.me().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Restored session");
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                tracing::info!("Stored session rejected, signing out: {}", e);
                self.api.tokens().clear()?;
                self.state = AuthState::Anonymous;
            }
        }
        Ok(&self.state)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        forms::validate_login(email, password)?;
        let auth = self
            .api
            .login(email.trim(), password)
            .await
            .context("Login failed")?;
        self.complete_sign_in(&auth).await
    }

    pub async fn register(&mut self, form: &RegisterForm) -> Result<&User> {
        let request = forms::validate_register(form)?;
        let auth = self
            .api
            .register(&request)
            .await
            .context("Failed to create account")?;
        self.complete_sign_in(&auth).await
    }

    pub async fn sign_in_with_oauth(
        &mut self,
        provider: OAuthProvider,
        code: &str,
        redirect_uri: &str,
    ) -> Result<&User> {
        let auth = self
            .api
            .oauth_exchange(provider, code, redirect_uri)
            .await
            .with_context(|| format!("{} sign-in failed", provider))?;
        self.complete_sign_in(&auth).await
    }

    /// Rotate the token pair using the stored refresh token.
    pub async fn refresh(&mut self) -> Result<()> {
        let refresh = self
            .api
            .tokens()
            .refresh_token()
            .context("No refresh token stored")?;
        let auth = self
            .api
            .refresh(&refresh)
            .await
            .context("Token refresh failed")?;
        self.api
            .tokens()
            .set_tokens(Some(&auth.access_token), Some(&auth.refresh_token))
    }

    /// Sign out locally, revoking the refresh token server-side when possible.
    ///
    /// A failed revoke is logged and does not keep the user signed in.
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(refresh) = self.api.tokens().refresh_token()
            && let Err(e) = self.api.logout(&refresh).await
        {
            tracing::warn!("Server-side logout failed: {}", e);
        }
        self.state = AuthState::Anonymous;
        self.api.tokens().clear()
    }

    async fn complete_sign_in(&mut self, auth: &AuthResponse) -> Result<&User> {
        self.api
            .tokens()
            .set_tokens(Some(&auth.access_token), Some(&auth.refresh_token))?;
        let user = self
            .api
            .me()
            .await
            .context("Signed in but failed to load profile")?;
        tracing::info!(user_id = %user.id, "Signed in");
        self.state = AuthState::Authenticated(user);
        self.user().context("session state lost after sign-in")
    }
}
