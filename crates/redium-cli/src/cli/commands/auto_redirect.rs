//! `redium auto-redirect <on|off>` – store the auto-redirect flag.

use anyhow::{Context, Result};
use redium_core::pipeline::Redirector;
use redium_core::prefs::{JsonPreferenceStore, PreferenceStore};

pub async fn run_auto_redirect(
    redirector: &Redirector,
    store: &JsonPreferenceStore,
    enabled: bool,
) -> Result<()> {
    let mut prefs = store.load().await.context("load preferences")?;
    prefs.auto_redirect = enabled;
    store.save(&prefs).await.context("save preferences")?;
    tracing::info!("auto-redirect set to {}", enabled);

    println!("Auto-redirect {}.", if enabled { "on" } else { "off" });
    println!("{}", serde_json::to_string_pretty(&redirector.rules(&prefs))?);
    Ok(())
}
