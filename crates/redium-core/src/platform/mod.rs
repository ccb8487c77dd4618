//! Host platform boundary: the events a host delivers and the side effects
//! it performs on the agent's behalf.

mod recording;

pub use recording::{Action, RecordingPlatform};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;
use crate::rules::RuleUpdate;

pub type TabId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptSetting {
    Allow,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    /// Position in the window's tab strip.
    pub index: u32,
    pub url: Option<String>,
}

/// Everything the host can tell the agent about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Extension installed or updated.
    Installed,
    /// Browser started or extension re-enabled.
    Startup,
    MenuClicked {
        item_id: String,
        checked: Option<bool>,
    },
    /// User pressed the toolbar action or its shortcut on `tab`.
    ActionClicked { tab: TabInfo },
    TabUpdated {
        tab: TabInfo,
        status: Option<TabStatus>,
    },
    TabRemoved { tab_id: TabId },
}

/// Side effects the host performs. Every call may fail; the agent logs and
/// carries on.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Removes and adds dynamic rules as one update.
    async fn apply_rules(&self, update: &RuleUpdate) -> anyhow::Result<()>;

    /// Replaces the action context menu with `items`.
    async fn set_menu(&self, items: &[MenuItem]) -> anyhow::Result<()>;

    async fn set_action_title(&self, title: &str) -> anyhow::Result<()>;

    async fn update_tab(&self, tab: TabId, url: &str) -> anyhow::Result<()>;

    /// Opens `url` in a new tab at `index`, returning its id.
    async fn create_tab(&self, index: u32, url: &str) -> anyhow::Result<TabId>;

    async fn script_setting(&self, url: &str) -> anyhow::Result<ScriptSetting>;

    async fn set_script_setting(&self, pattern: &str, setting: ScriptSetting) -> anyhow::Result<()>;

    /// Session-scoped note that `tab` had scripts blocked for `pattern`.
    async fn mark_tab(&self, tab: TabId, pattern: &str) -> anyhow::Result<()>;

    /// Removes and returns the note for `tab`, if any.
    async fn take_tab_mark(&self, tab: TabId) -> anyhow::Result<Option<String>>;
}
