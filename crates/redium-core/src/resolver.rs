//! Redirect resolution: maps a normalized article URL and a service to the
//! destination URL on that service.

use crate::prefs::Preferences;
use crate::service::{ServiceDescriptor, ServiceId, ServiceRegistry, UrlTransform};
use crate::url_model::CandidateUrl;

/// Requested service is not part of the configured registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("service {0} is not configured")]
    InvalidService(ServiceId),
}

/// Destination computed for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub destination: String,
    pub service: ServiceId,
    /// Host pattern whose JavaScript permission should be blocked while the
    /// destination is open (cache-style services only).
    pub script_block: Option<String>,
}

/// Computes the destination URL for `url` on `service`.
///
/// If the URL is already on the service's host it is returned unchanged, so
/// that landing on the proxy never bounces again.
///
/// # Examples
///
/// - Scribe, `https://medium.com/@foo/bar-0123abcd` → `https://scribe.rip/@foo/bar-0123abcd`
/// - 12ft, same input → `https://12ft.io/https://medium.com/@foo/bar-0123abcd`
pub fn resolve(url: &CandidateUrl, service: &ServiceDescriptor) -> String {
    if url.host().contains(service.target_host.as_str()) {
        return url.href().to_string();
    }

    let host = &service.target_host;
    match &service.transform {
        UrlTransform::WholeUrlEmbed => format!("https://{}/{}", host, url.href()),
        UrlTransform::HostSwapKeepPath => format!("https://{}{}", host, url.path()),
        UrlTransform::HostSwapLocalePrefix { locale } => {
            format!("https://{}/{}/{}", host, locale, url.href())
        }
        UrlTransform::SearchCache => format!("https://{}/search?q=cache:{}", host, url.href()),
    }
}

/// Registry-bound resolver.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a ServiceRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ServiceRegistry) -> Self {
        Self { registry }
    }

    /// Resolves against an explicitly chosen service; fails if it is not configured.
    pub fn resolve_with(&self, url: &CandidateUrl, id: ServiceId) -> Result<String, ResolveError> {
        let service = self
            .registry
            .get(id)
            .ok_or(ResolveError::InvalidService(id))?;
        Ok(resolve(url, service))
    }

    /// Resolves against the stored selection, falling back to the registry
    /// default when the selection is unknown. Never fails.
    pub fn resolve_for(&self, url: &CandidateUrl, prefs: &Preferences) -> Redirect {
        let service = self.registry.selected(prefs);
        let destination = resolve(url, service);
        tracing::debug!("resolved {} via {} -> {}", url, service.id, destination);
        Redirect {
            destination,
            service: service.id,
            script_block: service.script_block_pattern(),
        }
    }
}
