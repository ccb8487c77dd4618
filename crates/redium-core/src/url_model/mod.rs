//! URL modeling and article classification.
//!
//! `CandidateUrl` is an immutable parsed page URL; the classifier decides
//! whether it points at a redirectable article and produces the normalized
//! form the resolver works on.

mod classify;

pub use classify::{Classification, Classifier, ClassifierConfig, ClassifierError, RejectReason};

use std::fmt;
use std::str::FromStr;
use url::Url;

/// A parsed page URL. Never mutated in place: transforms return new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl(Url);

impl CandidateUrl {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self)
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Host name, or `""` for host-less URLs (e.g. `data:`).
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or("")
    }

    /// Percent-encoded path, always starting with `/` for http(s) URLs.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.0.query()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.0.fragment()
    }

    /// Full serialized URL.
    pub fn href(&self) -> &str {
        self.0.as_str()
    }

    /// Copy of this URL without query string or fragment.
    pub fn without_query(&self) -> Self {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        Self(url)
    }

    /// Copy of this URL with the host replaced. `None` if the scheme cannot
    /// carry the given host.
    pub fn with_host(&self, host: &str) -> Option<Self> {
        let mut url = self.0.clone();
        url.set_host(Some(host)).ok()?;
        Some(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for CandidateUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for CandidateUrl {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}
