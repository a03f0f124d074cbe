//! Light/dark theme preference.

use crate::error::Result;
use crate::storage::LocalStore;
use std::fmt;
use std::str::FromStr;

/// Storage key holding the explicit preference.
pub const THEME_KEY: &str = "blepp-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Stored preference wins; otherwise follow the system, otherwise light.
pub fn stored_theme(store: &LocalStore, system_prefers_dark: bool) -> ThemePreference {
    match store.get(THEME_KEY).as_deref().map(str::parse) {
        Some(Ok(theme)) => theme,
        _ if system_prefers_dark => ThemePreference::Dark,
        _ => ThemePreference::Light,
    }
}

/// Persist `theme` as the explicit preference.
pub fn apply_theme(store: &LocalStore, theme: ThemePreference) -> Result<()> {
    tracing::debug!(%theme, "Applying theme");
    store.set(THEME_KEY, theme.as_str())
}

/// Best-effort system preference from the environment.
///
/// Honors `BLEPP_THEME` first, then the `COLORFGBG` convention many terminals
/// export (background colour 0-6 or 8 is dark).
pub fn system_prefers_dark() -> bool {
    if let Ok(theme) = std::env::var("BLEPP_THEME") {
        return theme.eq_ignore_ascii_case("dark");
    }
    std::env::var("COLORFGBG").is_ok_and(|value| colorfgbg_is_dark(&value))
}

fn colorfgbg_is_dark(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| bg < 7 || bg == 8)
}
