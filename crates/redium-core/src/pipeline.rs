//! The classify → resolve pipeline bound to one immutable configuration.

use crate::config::InterceptionMode;
use crate::prefs::Preferences;
use crate::resolver::{Redirect, Resolver};
use crate::rules::{compile_rules, RuleUpdate};
use crate::service::ServiceRegistry;
use crate::url_model::{CandidateUrl, Classification, Classifier};

/// Immutable redirect context, built once from config and shared by every
/// event handler.
#[derive(Debug, Clone)]
pub struct Redirector {
    classifier: Classifier,
    registry: ServiceRegistry,
    mode: InterceptionMode,
}

impl Redirector {
    pub fn new(classifier: Classifier, registry: ServiceRegistry, mode: InterceptionMode) -> Self {
        Self {
            classifier,
            registry,
            mode,
        }
    }

    /// Same pipeline with a different interception mode.
    pub fn with_mode(mut self, mode: InterceptionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn mode(&self) -> InterceptionMode {
        self.mode
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry)
    }

    pub fn classify(&self, url: &CandidateUrl) -> Classification {
        self.classifier.classify(url)
    }

    /// Full pipeline for an article URL: `None` when the classifier rejects it.
    pub fn redirect(&self, url: &CandidateUrl, prefs: &Preferences) -> Option<Redirect> {
        match self.classifier.classify(url) {
            Classification::Accepted(normalized) => Some(self.resolver().resolve_for(&normalized, prefs)),
            Classification::Rejected(reason) => {
                tracing::trace!("not redirecting {}: {}", url, reason);
                None
            }
        }
    }

    /// Manual redirect: articles are normalized first, anything else http(s)
    /// is sent to the service as-is. `None` for non-http(s) URLs.
    pub fn redirect_any(&self, url: &CandidateUrl, prefs: &Preferences) -> Option<Redirect> {
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let target = self.classifier.classify(url).into_accepted();
        let target = target.as_ref().unwrap_or(url);
        Some(self.resolver().resolve_for(target, prefs))
    }

    pub fn rules(&self, prefs: &Preferences) -> RuleUpdate {
        compile_rules(&self.classifier, &self.registry, prefs)
    }
}

impl Default for Redirector {
    fn default() -> Self {
        Self::new(
            Classifier::default(),
            ServiceRegistry::builtin(),
            InterceptionMode::default(),
        )
    }
}
