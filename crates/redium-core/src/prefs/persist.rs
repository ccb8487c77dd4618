//! Persist preferences as JSON under the XDG state dir.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{PreferenceStore, Preferences, StoreError};

/// File-backed store: `~/.local/state/redium/preferences.json` by default.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default path for the preference file.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("redium")?;
        Ok(xdg_dirs.get_state_home().join("redium").join("preferences.json"))
    }

    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    /// A missing file loads as defaults; so does an unparsable one, after a
    /// warning, since a corrupted record must never block redirects.
    async fn load(&self) -> Result<Preferences, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Preferences::default()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable preferences at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Preferences::default())
            }
        }
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}
