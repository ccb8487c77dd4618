//! Article URL classification.

use regex::Regex;
use std::fmt;

use super::CandidateUrl;

/// Parameters of the acceptance rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Source domain; the domain itself and all of its subdomains are accepted.
    pub source_domain: String,
    /// Path prefix the source site uses for its own 3xx redirects: a single
    /// segment such as `/m/`, without dashes.
    pub reserved_segment: String,
    /// Minimum length of the trailing hex article id.
    pub min_hex_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            source_domain: "medium.com".to_string(),
            reserved_segment: "/m/".to_string(),
            min_hex_len: 8,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("reserved segment must be a single dash-free segment like \"/m/\", got {0:?}")]
    InvalidReservedSegment(String),
    #[error("source domain is empty")]
    EmptyDomain,
    #[error("minimum hex length must be at least 1")]
    ZeroHexLen,
    #[error("invalid article pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Why a URL was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Malformed,
    UnsupportedScheme,
    ForeignHost,
    ReservedPath,
    NotAnArticle,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Malformed => "malformed url",
            RejectReason::UnsupportedScheme => "unsupported scheme",
            RejectReason::ForeignHost => "host outside source domain",
            RejectReason::ReservedPath => "reserved redirect path",
            RejectReason::NotAnArticle => "not an article path",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Article URL, query and fragment removed.
    Accepted(CandidateUrl),
    Rejected(RejectReason),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted(_))
    }

    pub fn into_accepted(self) -> Option<CandidateUrl> {
        match self {
            Classification::Accepted(url) => Some(url),
            Classification::Rejected(_) => None,
        }
    }
}

/// Decides whether a page URL is a redirectable article.
///
/// Built once from [`ClassifierConfig`]; classification itself is pure and
/// allocation-free apart from the normalized URL it returns.
#[derive(Debug, Clone)]
pub struct Classifier {
    cfg: ClassifierConfig,
    article_path: Regex,
}

impl Classifier {
    pub fn new(cfg: ClassifierConfig) -> Result<Self, ClassifierError> {
        if cfg.source_domain.is_empty() {
            return Err(ClassifierError::EmptyDomain);
        }
        if cfg.min_hex_len == 0 {
            return Err(ClassifierError::ZeroHexLen);
        }
        let seg = &cfg.reserved_segment;
        let name = seg
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or("");
        let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '~' | '@');
        if name.is_empty() || !name.chars().all(valid_char) {
            return Err(ClassifierError::InvalidReservedSegment(seg.clone()));
        }
        let article_path = Regex::new(&format!("^.+-[0-9a-f]{{{},}}$", cfg.min_hex_len))?;
        Ok(Self { cfg, article_path })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.cfg
    }

    pub fn classify(&self, url: &CandidateUrl) -> Classification {
        if !matches!(url.scheme(), "http" | "https") {
            return Classification::Rejected(RejectReason::UnsupportedScheme);
        }
        if !self.in_source_domain(url.host()) {
            return Classification::Rejected(RejectReason::ForeignHost);
        }
        let path = url.path();
        if path.starts_with(&self.cfg.reserved_segment) {
            return Classification::Rejected(RejectReason::ReservedPath);
        }
        if !self.article_path.is_match(path) {
            return Classification::Rejected(RejectReason::NotAnArticle);
        }
        // Cache-style services fail to find pages when query params are present.
        Classification::Accepted(url.without_query())
    }

    /// Parses and classifies; unparsable input is rejected as malformed.
    pub fn classify_str(&self, input: &str) -> Classification {
        match CandidateUrl::parse(input) {
            Ok(url) => self.classify(&url),
            Err(_) => Classification::Rejected(RejectReason::Malformed),
        }
    }

    fn in_source_domain(&self, host: &str) -> bool {
        let domain = self.cfg.source_domain.as_str();
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|sub| sub.ends_with('.'))
    }

    /// The acceptance rule as a single whole-URL regular expression, for
    /// host platforms that match requests declaratively.
    ///
    /// The host platform's regex engine has no look-around, so the reserved
    /// segment is excluded by enumerating every way a path can diverge from
    /// it. Relies on the segment containing no `-`.
    ///
    /// Capture group 1 holds the URL without query and fragment, the same
    /// value `classify` returns on acceptance.
    pub fn url_filter(&self) -> String {
        let hex = format!("-[0-9a-f]{{{},}}", self.cfg.min_hex_len);
        let reserved: Vec<char> = self.cfg.reserved_segment[1..].chars().collect();

        let mut alternatives = Vec::with_capacity(reserved.len());
        for i in 0..reserved.len() {
            let prefix = regex::escape(&reserved[..i].iter().collect::<String>());
            let not_c = regex::escape(&reserved[i].to_string());
            alternatives.push(format!("{prefix}(?:[^?#{not_c}][^?#]*)?{hex}"));
        }

        format!(
            "^(https?://(?:[^/?#@]*@)?(?:[^/?#@:]+\\.)?{}(?::[0-9]+)?/(?:{}))(?:[?#].*)?$",
            regex::escape(&self.cfg.source_domain),
            alternatives.join("|")
        )
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // The default config is statically valid.
        Self::new(ClassifierConfig::default()).expect("default classifier config")
    }
}
