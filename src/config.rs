//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional `config.toml` in the
//! user config directory, then environment variables. The CLI applies its own
//! flags on top of the loaded value.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default backend when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Overrides `api_base_url`.
pub const API_BASE_URL_ENV: &str = "BLEPP_API_BASE_URL";

/// Overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "BLEPP_DATA_DIR";

/// Shortest query the search box may be configured to send.
pub const MIN_QUERY_CHARS: usize = 2;

const APP_DIR: &str = "blepp";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin; request paths (`/api/...`) are joined onto it.
    pub api_base_url: Url,
    /// Directory holding `storage.json`.
    pub data_dir: PathBuf,
    pub search: SearchConfig,
}

/// Tuning for the header search aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a query runs.
    pub debounce: Duration,
    /// Trimmed queries shorter than this never reach the network.
    pub min_query_chars: usize,
    /// Maximum results kept per category.
    pub per_category_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_chars: MIN_QUERY_CHARS,
            per_category_limit: 5,
        }
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    data_dir: Option<PathBuf>,
    search: FileSearchConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSearchConfig {
    debounce_ms: Option<u64>,
    min_query_chars: Option<usize>,
    per_category_limit: Option<usize>,
}

impl ClientConfig {
    /// Configuration pointing at `api_base_url` with default everything else.
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            data_dir: default_data_dir(),
            search: SearchConfig::default(),
        })
    }

    /// Load from the default config file location and the environment.
    pub fn load() -> Result<Self> {
        let path = dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE));
        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an explicit file (missing file is fine) and an environment lookup.
    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str::<FileConfig>(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => FileConfig::default(),
        };

        let base_url = env(API_BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let data_dir = env(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let defaults = SearchConfig::default();
        let search = SearchConfig {
            debounce: file
                .search
                .debounce_ms
                .map_or(defaults.debounce, Duration::from_millis),
            min_query_chars: file
                .search
                .min_query_chars
                .unwrap_or(defaults.min_query_chars),
            per_category_limit: file
                .search
                .per_category_limit
                .unwrap_or(defaults.per_category_limit),
        };

        if search.per_category_limit == 0 {
            anyhow::bail!("search.per_category_limit must be at least 1");
        }
        if search.min_query_chars < MIN_QUERY_CHARS {
            anyhow::bail!(
                "search.min_query_chars must be at least {}",
                MIN_QUERY_CHARS
            );
        }

        Ok(Self {
            api_base_url: parse_base_url(&base_url)?,
            data_dir,
            search,
        })
    }

    /// Path of the persistent key/value store.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("Invalid API base URL '{}'", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("API base URL '{}' cannot carry request paths", raw);
    }
    Ok(url)
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".blepp"))
}
