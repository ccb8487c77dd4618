//! `redium select <id>` – store the selected service.

use anyhow::{Context, Result};
use redium_core::pipeline::Redirector;
use redium_core::prefs::{JsonPreferenceStore, PreferenceStore};
use redium_core::service::ServiceId;

pub async fn run_select(
    redirector: &Redirector,
    store: &JsonPreferenceStore,
    service: &str,
) -> Result<()> {
    let id: ServiceId = service.parse()?;
    if redirector.registry().get(id).is_none() {
        anyhow::bail!("service {id} is not configured");
    }

    let mut prefs = store.load().await.context("load preferences")?;
    prefs.selected_service = Some(id.to_string());
    store.save(&prefs).await.context("save preferences")?;
    tracing::info!("selected service {}", id);

    println!("Selected {id}.");
    println!("{}", serde_json::to_string_pretty(&redirector.rules(&prefs))?);
    Ok(())
}
