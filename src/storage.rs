//! Persistent key/value storage and the auth token store built on it.
//!
//! [`LocalStore`] mirrors the browser's local storage: string keys, string
//! values, synchronous reads and writes. Writes are flushed to a JSON file
//! immediately so a second process sees them.

use crate::error::Result;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Storage key for the bearer token attached to API requests.
pub const ACCESS_TOKEN_KEY: &str = "blepp_access_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "blepp_refresh_token";

/// String key/value store, optionally backed by a JSON file.
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or lazily create) a file-backed store.
    ///
    /// A missing file is an empty store; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage file {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse storage file {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened local store");

        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner {
                path: Some(path),
                entries,
            })),
        })
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.read().path.clone()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read().entries.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.write();
        inner.entries.insert(key.to_string(), value.to_string());
        inner.flush()
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.write();
        if inner.entries.remove(key).is_some() {
            inner.flush()?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        // A panic mid-insert leaves the map itself intact
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StoreInner {
    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_entries(path, &self.entries)
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;

    // Write-then-rename so a crash never leaves half a file behind
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)
        .with_context(|| format!("Failed to write storage to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace storage file {}", path.display()))?;
    Ok(())
}

/// Access and refresh tokens kept in a [`LocalStore`].
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    store: LocalStore,
}

impl TokenStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Store whichever tokens are present; absent or empty ones leave the old value.
    pub fn set_tokens(&self, access: Option<&str>, refresh: Option<&str>) -> Result<()> {
        if let Some(access) = access.filter(|t| !t.is_empty()) {
            self.store.set(ACCESS_TOKEN_KEY, access)?;
        }
        if let Some(refresh) = refresh.filter(|t| !t.is_empty()) {
            self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
