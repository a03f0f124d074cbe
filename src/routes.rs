//! Route guards and legacy path redirects.

use crate::session::AuthState;

pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Old or section-root paths and where they now live.
const REDIRECTS: &[(&str, &str)] = &[
    ("/dashboard/study", "/dashboard/study/topics"),
    ("/dashboard/questions", "/dashboard/questions/bank"),
    ("/dashboard/exams", "/dashboard/exams/list"),
    ("/dashboard/mocks", "/dashboard/exams/list"),
];

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone (landing, pricing, about).
    Open,
    /// Signed-in users only.
    Protected,
    /// Anonymous users only (login, register).
    PublicOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is still being restored; show a spinner.
    Loading,
    Render,
    Redirect(&'static str),
}

pub fn guard(access: RouteAccess, auth: &AuthState) -> GuardDecision {
    match (access, auth) {
        (RouteAccess::Open, _) => GuardDecision::Render,
        (_, AuthState::Loading) => GuardDecision::Loading,
        (RouteAccess::Protected, AuthState::Anonymous) => GuardDecision::Redirect(LOGIN_PATH),
        (RouteAccess::PublicOnly, AuthState::Authenticated(_)) => {
            GuardDecision::Redirect(DASHBOARD_PATH)
        }
        _ => GuardDecision::Render,
    }
}

/// Access level for a path, from its prefix.
pub fn access_for(path: &str) -> RouteAccess {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path == "/auth/login" || path == "/auth/register" {
        RouteAccess::PublicOnly
    } else if path == DASHBOARD_PATH || path.starts_with("/dashboard/") {
        RouteAccess::Protected
    } else {
        RouteAccess::Open
    }
}

/// Canonical target for a legacy path, if it has moved.
pub fn redirect_for(path: &str) -> Option<&'static str> {
    let path = path.trim_end_matches('/');
    REDIRECTS
        .iter()
        .find(|(from, _)| *from == path)
        .map(|(_, to)| *to)
}

/// Resolve a navigation: follow a legacy redirect, then apply the guard.
pub fn resolve(path: &str, auth: &AuthState) -> GuardDecision {
    if let Some(target) = redirect_for(path) {
        return GuardDecision::Redirect(target);
    }
    guard(access_for(path), auth)
}
