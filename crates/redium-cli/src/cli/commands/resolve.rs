//! `redium resolve <url> [--service <id>]` – print the mirror destination.

use anyhow::{Context, Result};
use redium_core::pipeline::Redirector;
use redium_core::prefs::{JsonPreferenceStore, PreferenceStore};
use redium_core::service::ServiceId;
use redium_core::url_model::Classification;

/// With `--service`, an unknown or unconfigured id is an error. Without it the
/// stored selection is used, falling back to the default.
pub async fn run_resolve(
    redirector: &Redirector,
    store: &JsonPreferenceStore,
    url: &str,
    service: Option<&str>,
) -> Result<()> {
    let normalized = match redirector.classifier().classify_str(url) {
        Classification::Accepted(u) => u,
        Classification::Rejected(reason) => {
            println!("rejected: {reason}");
            return Ok(());
        }
    };

    let destination = match service {
        Some(id) => {
            let id: ServiceId = id.parse()?;
            redirector.resolver().resolve_with(&normalized, id)?
        }
        None => {
            let prefs = store.load().await.context("load preferences")?;
            redirector.resolver().resolve_for(&normalized, &prefs).destination
        }
    };
    println!("{destination}");
    Ok(())
}
