//! Proxy/mirror services: identifiers, URL-shape transforms and the registry
//! that binds them to target hosts.

mod descriptor;
mod id;
mod registry;

pub use descriptor::{ServiceDescriptor, UrlTransform};
pub use id::{ServiceId, ServiceIdError};
pub use registry::{RegistryError, ServiceRegistry};
