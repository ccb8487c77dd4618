use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::Redirector;
use crate::service::{RegistryError, ServiceDescriptor, ServiceId, ServiceRegistry};
use crate::url_model::{Classifier, ClassifierConfig};

/// How auto-redirect intercepts navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptionMode {
    /// Install a declarative rule; the host rewrites matching requests itself.
    #[default]
    Declarative,
    /// Watch tab updates and navigate matching tabs after the fact.
    Observe,
}

/// Global configuration loaded from `~/.config/redium/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RediumConfig {
    /// Domain whose articles are redirected (subdomains included).
    pub source_domain: String,
    /// Path prefix the source site uses for its own redirects; never redirected.
    pub reserved_segment: String,
    /// Minimum length of the hex article id at the end of the path.
    pub min_hex_len: usize,
    #[serde(default)]
    pub interception: InterceptionMode,
    /// Service used when the stored selection is missing or unknown.
    pub default_service: ServiceId,
    /// Configured services, in menu order. Missing = built-in set.
    #[serde(default = "ServiceDescriptor::builtin")]
    pub services: Vec<ServiceDescriptor>,
}

impl Default for RediumConfig {
    fn default() -> Self {
        let classifier = ClassifierConfig::default();
        Self {
            source_domain: classifier.source_domain,
            reserved_segment: classifier.reserved_segment,
            min_hex_len: classifier.min_hex_len,
            interception: InterceptionMode::default(),
            default_service: ServiceId::Scribe,
            services: ServiceDescriptor::builtin(),
        }
    }
}

impl RediumConfig {
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            source_domain: self.source_domain.clone(),
            reserved_segment: self.reserved_segment.clone(),
            min_hex_len: self.min_hex_len,
        }
    }

    pub fn registry(&self) -> Result<ServiceRegistry, RegistryError> {
        ServiceRegistry::new(self.services.clone(), self.default_service)
    }

    /// Validates the config and builds the immutable redirect pipeline.
    pub fn redirector(&self) -> Result<Redirector> {
        let classifier =
            Classifier::new(self.classifier_config()).context("invalid classifier settings")?;
        let registry = self.registry().context("invalid service settings")?;
        Ok(Redirector::new(classifier, registry, self.interception))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("redium")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RediumConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<RediumConfig> {
    if !path.exists() {
        let default_cfg = RediumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RediumConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
