//! Immutable service registry built once at startup and passed by reference.

use super::{ServiceDescriptor, ServiceId};
use crate::prefs::Preferences;

/// Inconsistent registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("default service {0} is not configured")]
    MissingDefault(ServiceId),
    #[error("service {0} is configured more than once")]
    Duplicate(ServiceId),
}

/// The configured set of services plus the fallback used when the stored
/// selection is unknown or no longer configured.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
    default_index: usize,
}

impl ServiceRegistry {
    pub fn new(
        services: Vec<ServiceDescriptor>,
        default_service: ServiceId,
    ) -> Result<Self, RegistryError> {
        for (i, s) in services.iter().enumerate() {
            if services[..i].iter().any(|prev| prev.id == s.id) {
                return Err(RegistryError::Duplicate(s.id));
            }
        }
        let default_index = services
            .iter()
            .position(|s| s.id == default_service)
            .ok_or(RegistryError::MissingDefault(default_service))?;
        Ok(Self {
            services,
            default_index,
        })
    }

    /// Built-in services with Scribe as the default.
    pub fn builtin() -> Self {
        Self {
            services: ServiceDescriptor::builtin(),
            default_index: 0,
        }
    }

    pub fn get(&self, id: ServiceId) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn default_service(&self) -> &ServiceDescriptor {
        &self.services[self.default_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }

    /// Service the preferences point at, or the default if none is stored.
    pub fn selected(&self, prefs: &Preferences) -> &ServiceDescriptor {
        match prefs.selected_service.as_deref() {
            Some(stored) => self.select(stored),
            None => self.default_service(),
        }
    }

    /// Maps a stored selection to a configured service, falling back to the
    /// default when the id is unknown or not in this registry.
    pub fn select(&self, stored: &str) -> &ServiceDescriptor {
        match stored.parse::<ServiceId>() {
            Ok(id) => match self.get(id) {
                Some(s) => s,
                None => {
                    tracing::warn!(
                        "selected service {} is not configured, using {}",
                        id,
                        self.default_service().id
                    );
                    self.default_service()
                }
            },
            Err(e) => {
                tracing::warn!("{}, using {}", e, self.default_service().id);
                self.default_service()
            }
        }
    }
}
