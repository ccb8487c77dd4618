//! Event-driven redirect agent.
//!
//! A single entry point receives every host event. Preferences are read fresh
//! at the start of each event, so a toggle takes effect on the next
//! navigation without re-registering anything. Store and platform failures
//! are logged and swallowed: the worst outcome is that no redirect happens.

use anyhow::Result;

use crate::config::InterceptionMode;
use crate::menu::{action_title, build_menu, AUTO_REDIRECT_MENU_ID};
use crate::pipeline::Redirector;
use crate::platform::{Event, Platform, ScriptSetting, TabId, TabInfo, TabStatus};
use crate::prefs::{PreferenceStore, Preferences};
use crate::resolver::Redirect;
use crate::service::ServiceId;
use crate::url_model::CandidateUrl;

pub struct RedirectAgent<S, P> {
    redirector: Redirector,
    store: S,
    platform: P,
}

impl<S: PreferenceStore, P: Platform> RedirectAgent<S, P> {
    pub fn new(redirector: Redirector, store: S, platform: P) -> Self {
        Self {
            redirector,
            store,
            platform,
        }
    }

    pub fn redirector(&self) -> &Redirector {
        &self.redirector
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handles one host event to completion. Never fails.
    pub async fn handle(&self, event: Event) {
        let what = event_name(&event);
        let result = match event {
            Event::Installed => self.on_installed().await,
            Event::Startup => self.on_startup().await,
            Event::MenuClicked { item_id, checked } => self.on_menu_clicked(&item_id, checked).await,
            Event::ActionClicked { tab } => self.on_action_clicked(&tab).await,
            Event::TabUpdated { tab, status } => self.on_tab_updated(&tab, status).await,
            Event::TabRemoved { tab_id } => self.on_tab_removed(tab_id).await,
        };
        if let Err(e) = result {
            tracing::warn!("{} handler failed: {:#}", what, e);
        }
    }

    async fn load_prefs(&self) -> Preferences {
        match self.store.load().await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("preference store unavailable, using defaults: {}", e);
                Preferences::default()
            }
        }
    }

    async fn on_installed(&self) -> Result<()> {
        let prefs = self.load_prefs().await;
        let registry = self.redirector.registry();
        self.platform.set_menu(&build_menu(registry, &prefs)).await?;
        self.platform.set_action_title(&action_title(registry, &prefs)).await?;
        self.install_rules(&prefs).await
    }

    async fn on_startup(&self) -> Result<()> {
        let prefs = self.load_prefs().await;
        self.platform
            .set_action_title(&action_title(self.redirector.registry(), &prefs))
            .await
    }

    async fn on_menu_clicked(&self, item_id: &str, checked: Option<bool>) -> Result<()> {
        let mut prefs = self.load_prefs().await;

        if item_id == AUTO_REDIRECT_MENU_ID {
            prefs.auto_redirect = checked.unwrap_or(true);
            tracing::info!("auto-redirect set to {}", prefs.auto_redirect);
        } else {
            let Ok(id) = item_id.parse::<ServiceId>() else {
                return Ok(());
            };
            if self.redirector.registry().get(id).is_none() {
                tracing::warn!("menu selected unconfigured service {}", id);
                return Ok(());
            }
            prefs.selected_service = Some(id.to_string());
            tracing::info!("selected service {}", id);
            self.platform
                .set_action_title(&action_title(self.redirector.registry(), &prefs))
                .await?;
        }

        if let Err(e) = self.store.save(&prefs).await {
            tracing::warn!("failed to save preferences: {}", e);
        }
        self.install_rules(&prefs).await
    }

    async fn on_action_clicked(&self, tab: &TabInfo) -> Result<()> {
        let Some(raw) = tab.url.as_deref().filter(|u| u.starts_with("http")) else {
            return Ok(());
        };
        let url = CandidateUrl::parse(raw)?;
        let prefs = self.load_prefs().await;
        let Some(redirect) = self.redirector.redirect_any(&url, &prefs) else {
            return Ok(());
        };

        let blocked = self.block_scripts(&redirect).await?;
        let new_tab = self.platform.create_tab(tab.index + 1, &redirect.destination).await?;
        tracing::info!("opened {} in tab {}", redirect.destination, new_tab);
        if let Some(pattern) = blocked {
            self.platform.mark_tab(new_tab, &pattern).await?;
        }
        Ok(())
    }

    async fn on_tab_updated(&self, tab: &TabInfo, status: Option<TabStatus>) -> Result<()> {
        if self.redirector.mode() != InterceptionMode::Observe || status != Some(TabStatus::Loading) {
            return Ok(());
        }
        let Some(raw) = tab.url.as_deref() else {
            return Ok(());
        };
        let prefs = self.load_prefs().await;
        if !prefs.auto_redirect {
            return Ok(());
        }
        let Ok(url) = CandidateUrl::parse(raw) else {
            return Ok(());
        };
        let Some(redirect) = self.redirector.redirect(&url, &prefs) else {
            return Ok(());
        };
        if redirect.destination == url.href() {
            return Ok(());
        }

        let blocked = self.block_scripts(&redirect).await?;
        if let Some(pattern) = blocked {
            self.platform.mark_tab(tab.id, &pattern).await?;
        }
        self.platform.update_tab(tab.id, &redirect.destination).await?;
        tracing::info!("redirected tab {} to {}", tab.id, redirect.destination);
        Ok(())
    }

    async fn on_tab_removed(&self, tab_id: TabId) -> Result<()> {
        if let Some(pattern) = self.platform.take_tab_mark(tab_id).await? {
            self.platform
                .set_script_setting(&pattern, ScriptSetting::Allow)
                .await?;
            tracing::debug!("restored scripts for {} after tab {} closed", pattern, tab_id);
        }
        Ok(())
    }

    /// Blocks scripts for the redirect's host pattern if it needs it and they
    /// are currently allowed. Returns the pattern that was blocked.
    async fn block_scripts(&self, redirect: &Redirect) -> Result<Option<String>> {
        let Some(pattern) = redirect.script_block.as_deref() else {
            return Ok(None);
        };
        if self.platform.script_setting(&redirect.destination).await? != ScriptSetting::Allow {
            return Ok(None);
        }
        self.platform
            .set_script_setting(pattern, ScriptSetting::Block)
            .await?;
        Ok(Some(pattern.to_string()))
    }

    async fn install_rules(&self, prefs: &Preferences) -> Result<()> {
        if self.redirector.mode() != InterceptionMode::Declarative {
            return Ok(());
        }
        self.platform.apply_rules(&self.redirector.rules(prefs)).await
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Installed => "installed",
        Event::Startup => "startup",
        Event::MenuClicked { .. } => "menu",
        Event::ActionClicked { .. } => "action",
        Event::TabUpdated { .. } => "tab-updated",
        Event::TabRemoved { .. } => "tab-removed",
    }
}

#[cfg(test)]
mod tests;
