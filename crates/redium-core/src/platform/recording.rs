//! A platform that performs nothing and records every side effect.
//!
//! Used by the CLI to show what a host would do for an event, and by tests.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Platform, ScriptSetting, TabId};
use crate::menu::MenuItem;
use crate::rules::RuleUpdate;

/// One side effect requested by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ApplyRules { update: RuleUpdate },
    SetMenu { items: Vec<MenuItem> },
    SetActionTitle { title: String },
    UpdateTab { tab: TabId, url: String },
    CreateTab { tab: TabId, index: u32, url: String },
    SetScriptSetting { pattern: String, setting: ScriptSetting },
    MarkTab { tab: TabId, pattern: String },
}

#[derive(Debug)]
struct State {
    actions: Vec<Action>,
    /// Host pattern (`https://host/*`) -> setting.
    scripts: HashMap<String, ScriptSetting>,
    marks: HashMap<TabId, String>,
    next_tab: TabId,
}

#[derive(Debug)]
pub struct RecordingPlatform {
    state: Mutex<State>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RecordingPlatform {
    /// `first_tab` is the id handed to the first tab this platform creates.
    pub fn new(first_tab: TabId) -> Self {
        Self {
            state: Mutex::new(State {
                actions: Vec::new(),
                scripts: HashMap::new(),
                marks: HashMap::new(),
                next_tab: first_tab,
            }),
        }
    }

    /// Preloads a script setting, as if the user had configured it.
    pub fn with_script_setting(self, pattern: &str, setting: ScriptSetting) -> Self {
        self.recorded()
            .scripts
            .insert(pattern.to_string(), setting);
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.recorded().actions.clone()
    }

    pub fn take_actions(&self) -> Vec<Action> {
        std::mem::take(&mut self.recorded().actions)
    }

    /// Inspection accessors recover a poisoned lock.
    fn recorded(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> anyhow::Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("recording platform state poisoned"))
    }

    fn record(&self, action: Action) -> anyhow::Result<()> {
        self.state()?.actions.push(action);
        Ok(())
    }
}

/// Patterns are `scheme://host/*`; a URL matches when it starts with the
/// pattern's prefix.
fn pattern_matches(pattern: &str, url: &str) -> bool {
    url.starts_with(pattern.trim_end_matches('*'))
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn apply_rules(&self, update: &RuleUpdate) -> anyhow::Result<()> {
        self.record(Action::ApplyRules {
            update: update.clone(),
        })
    }

    async fn set_menu(&self, items: &[MenuItem]) -> anyhow::Result<()> {
        self.record(Action::SetMenu {
            items: items.to_vec(),
        })
    }

    async fn set_action_title(&self, title: &str) -> anyhow::Result<()> {
        self.record(Action::SetActionTitle {
            title: title.to_string(),
        })
    }

    async fn update_tab(&self, tab: TabId, url: &str) -> anyhow::Result<()> {
        self.record(Action::UpdateTab {
            tab,
            url: url.to_string(),
        })
    }

    async fn create_tab(&self, index: u32, url: &str) -> anyhow::Result<TabId> {
        let mut state = self.state()?;
        let tab = state.next_tab;
        state.next_tab += 1;
        state.actions.push(Action::CreateTab {
            tab,
            index,
            url: url.to_string(),
        });
        Ok(tab)
    }

    async fn script_setting(&self, url: &str) -> anyhow::Result<ScriptSetting> {
        let state = self.state()?;
        Ok(state
            .scripts
            .iter()
            .find(|(pattern, _)| pattern_matches(pattern, url))
            .map(|(_, setting)| *setting)
            .unwrap_or(ScriptSetting::Allow))
    }

    async fn set_script_setting(&self, pattern: &str, setting: ScriptSetting) -> anyhow::Result<()> {
        let mut state = self.state()?;
        state.scripts.insert(pattern.to_string(), setting);
        state.actions.push(Action::SetScriptSetting {
            pattern: pattern.to_string(),
            setting,
        });
        Ok(())
    }

    async fn mark_tab(&self, tab: TabId, pattern: &str) -> anyhow::Result<()> {
        let mut state = self.state()?;
        state.marks.insert(tab, pattern.to_string());
        state.actions.push(Action::MarkTab {
            tab,
            pattern: pattern.to_string(),
        });
        Ok(())
    }

    async fn take_tab_mark(&self, tab: TabId) -> anyhow::Result<Option<String>> {
        Ok(self.state()?.marks.remove(&tab))
    }
}
