//! The flat preference record and the store that owns it.
//!
//! The core only reads preferences when handling an event; writes happen on
//! explicit user actions (menu clicks, CLI `select`/`auto-redirect`).

mod persist;

pub use persist::JsonPreferenceStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// User preferences as persisted by the host.
///
/// Field names match the keys the extension has always stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Stored service id; `None` means "use the registry default". Kept as a
    /// raw string so that a corrupted value degrades to the default instead
    /// of failing to load.
    #[serde(rename = "selected_proxy", default, skip_serializing_if = "Option::is_none")]
    pub selected_service: Option<String>,
    #[serde(rename = "should_redirect", default = "default_auto_redirect")]
    pub auto_redirect: bool,
}

fn default_auto_redirect() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selected_service: None,
            auto_redirect: default_auto_redirect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preference store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent key-value store holding the preference record.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self) -> Result<Preferences, StoreError>;
    async fn save(&self, prefs: &Preferences) -> Result<(), StoreError>;
}

/// In-process store, for hosts that keep preferences elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    prefs: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Result<Preferences, StoreError> {
        Ok(self.prefs.lock().await.clone())
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        *self.prefs.lock().await = prefs.clone();
        Ok(())
    }
}
