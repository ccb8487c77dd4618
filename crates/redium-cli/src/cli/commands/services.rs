//! `redium services` – list configured services.

use anyhow::{Context, Result};
use redium_core::pipeline::Redirector;
use redium_core::prefs::{JsonPreferenceStore, PreferenceStore, Preferences};
use redium_core::service::UrlTransform;

pub async fn run_services(redirector: &Redirector, store: &JsonPreferenceStore) -> Result<()> {
    let prefs = store.load().await.context("load preferences")?;
    for line in service_lines(redirector, &prefs) {
        println!("{line}");
    }
    println!(
        "auto-redirect: {}",
        if prefs.auto_redirect { "on" } else { "off" }
    );
    Ok(())
}

fn transform_name(t: &UrlTransform) -> String {
    match t {
        UrlTransform::WholeUrlEmbed => "whole-url-embed".to_string(),
        UrlTransform::HostSwapKeepPath => "host-swap".to_string(),
        UrlTransform::HostSwapLocalePrefix { locale } => format!("locale-prefix({locale})"),
        UrlTransform::SearchCache => "search-cache".to_string(),
    }
}

fn service_lines(redirector: &Redirector, prefs: &Preferences) -> Vec<String> {
    let registry = redirector.registry();
    let selected = registry.selected(prefs).id;
    let default = registry.default_service().id;
    registry
        .iter()
        .map(|s| {
            let marker = if s.id == selected { "*" } else { " " };
            let suffix = if s.id == default { " (default)" } else { "" };
            format!(
                "{} {:<12} {:<32} {}{}",
                marker,
                s.id,
                s.target_host,
                transform_name(&s.transform),
                suffix
            )
        })
        .collect()
}
