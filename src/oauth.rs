//! OAuth authorization URLs and callback parsing.
//!
//! The client opens the provider's consent page, the provider redirects back
//! with `code` and `state`, and the code is exchanged through
//! [`crate::api::ApiClient::oauth_exchange`].

use std::fmt;
use std::str::FromStr;
use url::Url;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const FACEBOOK_AUTH_URL: &str = "https://www.facebook.com/v18.0/dialog/oauth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl OAuthProvider {
    /// Path segment used by the backend exchange endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }

    /// Consent page URL for `client_id`.
    pub fn authorization_url(self, client_id: &str, redirect_uri: &str, state: &str) -> Url {
        let (base, scope, extra): (&str, &str, &[(&str, &str)]) = match self {
            Self::Google => (
                GOOGLE_AUTH_URL,
                "openid email profile",
                &[("prompt", "select_account")],
            ),
            Self::Facebook => (FACEBOOK_AUTH_URL, "email,public_profile", &[]),
        };

        let mut url = Url::parse(base).expect("provider URL constants are valid");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", scope);
            for (key, value) in extra {
                query.append_pair(key, value);
            }
            query.append_pair("state", state);
        }
        url
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            other => Err(format!("unsupported OAuth provider '{}'", other)),
        }
    }
}

/// What the provider sent back to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl OAuthCallback {
    /// Parse the callback's query string (with or without a leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut callback = Self::default();
        let mut description = None;
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "code" => callback.code = Some(value.into_owned()),
                "state" => callback.state = Some(value.into_owned()),
                "error" => callback.error = Some(value.into_owned()),
                "error_description" => description = Some(value.into_owned()),
                _ => {}
            }
        }
        if callback.error.is_none() {
            callback.error = description;
        }
        callback
    }

    /// The authorization code, provided no error was reported and `state` matches.
    pub fn code_for_state(&self, expected_state: &str) -> Result<&str, String> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if self.state.as_deref() != Some(expected_state) {
            return Err("OAuth state mismatch".to_string());
        }
        self.code
            .as_deref()
            .ok_or_else(|| "Missing authorization code".to_string())
    }
}
