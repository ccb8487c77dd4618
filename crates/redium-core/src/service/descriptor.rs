//! Service descriptors: where a service lives and how it wants article URLs shaped.

use serde::{Deserialize, Serialize};

use super::ServiceId;

fn default_locale() -> String {
    "en".to_string()
}

/// How a service expects the source article URL to be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UrlTransform {
    /// `https://{host}/{href}`: the full source URL is appended as the path.
    WholeUrlEmbed,
    /// `https://{host}{pathname}`: only scheme and host change.
    HostSwapKeepPath,
    /// `https://{host}/{locale}/{href}`.
    HostSwapLocalePrefix {
        #[serde(default = "default_locale")]
        locale: String,
    },
    /// `https://{host}/search?q=cache:{href}`.
    SearchCache,
}

/// One proxy/mirror service. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub target_host: String,
    pub transform: UrlTransform,
}

impl ServiceDescriptor {
    pub fn new(id: ServiceId, target_host: impl Into<String>, transform: UrlTransform) -> Self {
        Self {
            id,
            target_host: target_host.into(),
            transform,
        }
    }

    /// Built-in service set, in menu order.
    pub fn builtin() -> Vec<ServiceDescriptor> {
        vec![
            Self::new(ServiceId::Scribe, "scribe.rip", UrlTransform::HostSwapKeepPath),
            Self::new(
                ServiceId::LibMedium,
                "libmedium.batsense.net",
                UrlTransform::HostSwapKeepPath,
            ),
            Self::new(ServiceId::TwelveFt, "12ft.io", UrlTransform::WholeUrlEmbed),
            Self::new(
                ServiceId::GoogleCache,
                "webcache.googleusercontent.com",
                UrlTransform::SearchCache,
            ),
        ]
    }

    /// Host pattern whose JavaScript permission must be blocked while the
    /// service's page is open. Only cache-style lookups need this: the cached
    /// copy's own scripts otherwise break rendering.
    pub fn script_block_pattern(&self) -> Option<String> {
        match self.transform {
            UrlTransform::SearchCache => Some(format!("https://{}/*", self.target_host)),
            UrlTransform::WholeUrlEmbed
            | UrlTransform::HostSwapKeepPath
            | UrlTransform::HostSwapLocalePrefix { .. } => None,
        }
    }
}
