//! `redium rules` – print the rule update for the current preferences.

use anyhow::{Context, Result};
use redium_core::pipeline::Redirector;
use redium_core::prefs::{JsonPreferenceStore, PreferenceStore};

pub async fn run_rules(redirector: &Redirector, store: &JsonPreferenceStore) -> Result<()> {
    let prefs = store.load().await.context("load preferences")?;
    let update = redirector.rules(&prefs);
    println!("{}", serde_json::to_string_pretty(&update)?);
    Ok(())
}
