//! Service identifiers as stored in the preference record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known proxy/mirror services.
///
/// The string forms (`"GoogleCache"`, `"12ft"`, `"LibMedium"`, `"Scribe"`) are
/// what the preference store and the host menu use, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    GoogleCache,
    #[serde(rename = "12ft")]
    TwelveFt,
    LibMedium,
    Scribe,
}

impl ServiceId {
    pub const ALL: [ServiceId; 4] = [
        ServiceId::Scribe,
        ServiceId::LibMedium,
        ServiceId::TwelveFt,
        ServiceId::GoogleCache,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::GoogleCache => "GoogleCache",
            ServiceId::TwelveFt => "12ft",
            ServiceId::LibMedium => "LibMedium",
            ServiceId::Scribe => "Scribe",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a stored or user-supplied id names no known service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown proxy service: {0:?}")]
pub struct ServiceIdError(pub String);

impl FromStr for ServiceId {
    type Err = ServiceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ServiceIdError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_ids() {
        assert_eq!("Scribe".parse::<ServiceId>().unwrap(), ServiceId::Scribe);
        assert_eq!("12ft".parse::<ServiceId>().unwrap(), ServiceId::TwelveFt);
        assert_eq!(
            "GoogleCache".parse::<ServiceId>().unwrap(),
            ServiceId::GoogleCache
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("scribe".parse::<ServiceId>().is_err());
        assert!("".parse::<ServiceId>().is_err());
    }

    #[test]
    fn display_matches_stored_form() {
        for id in ServiceId::ALL {
            assert_eq!(id.to_string().parse::<ServiceId>().unwrap(), id);
        }
    }

    #[test]
    fn serde_uses_stored_form() {
        let json = serde_json::to_string(&ServiceId::TwelveFt).unwrap();
        assert_eq!(json, "\"12ft\"");
    }
}
