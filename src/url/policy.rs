use crate::{ConfigError, UrlError};
use regex::Regex;
use url::Url;

/// Built-in exclusion patterns applied to every crawl
///
/// Binary/document downloads, destructive session paths and non-navigable
/// pseudo-links are never enqueued.
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    r"(?i)\.(jpg|jpeg|png|gif|svg|webp|ico|pdf|zip|exe|dmg)$",
    r"(?i)logout",
    r"(?i)delete",
    r"(?i)signout",
    r"#$",
    r"(?i)javascript:",
    r"(?i)mailto:",
    r"(?i)tel:",
];

/// Same-origin and exclusion-pattern policy for one crawl
///
/// A candidate URL is accepted only if its hostname exactly matches the
/// seed's hostname (no domain-suffix matching) and it matches none of the
/// exclusion patterns.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    base_host: String,
    exclude: Vec<Regex>,
}

impl UrlPolicy {
    /// Creates a policy for the given seed URL
    ///
    /// # Arguments
    ///
    /// * `seed` - The crawl's seed URL; its hostname becomes the origin gate
    /// * `extra_patterns` - Additional exclusion patterns from configuration
    pub fn new(seed: &Url, extra_patterns: &[String]) -> Result<Self, ConfigError> {
        let base_host = seed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidUrl(format!("{seed}: missing host")))?
            .to_string();

        let mut exclude = Vec::with_capacity(DEFAULT_EXCLUDE_PATTERNS.len() + extra_patterns.len());
        for pattern in DEFAULT_EXCLUDE_PATTERNS {
            // Built-in patterns are static and known-good
            exclude.push(
                Regex::new(pattern)
                    .map_err(|e| ConfigError::InvalidPattern(format!("{pattern}: {e}")))?,
            );
        }
        for pattern in extra_patterns {
            exclude.push(
                Regex::new(pattern)
                    .map_err(|e| ConfigError::InvalidPattern(format!("{pattern}: {e}")))?,
            );
        }

        Ok(Self { base_host, exclude })
    }

    /// Checks whether a normalized URL may be crawled
    pub fn is_allowed(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) if host == self.base_host => {}
            _ => return false,
        }

        !self.is_excluded(url.as_str())
    }

    /// Checks a raw string (e.g. an unresolved href) against the exclusion
    /// patterns only
    pub fn is_excluded(&self, candidate: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(candidate))
    }

    /// The hostname this policy is pinned to
    pub fn base_host(&self) -> &str {
        &self.base_host
    }
}

/// Parses and policy-checks a candidate in one step
///
/// Convenience used by the crawler: normalize, then gate. Errors from
/// normalization are reported distinctly from policy rejections.
pub fn check_candidate(
    policy: &UrlPolicy,
    candidate: &str,
    base: Option<&Url>,
) -> Result<Option<Url>, UrlError> {
    if policy.is_excluded(candidate) {
        return Ok(None);
    }

    let normalized = crate::url::normalize_url(candidate, base)?;

    if policy.is_allowed(&normalized) {
        Ok(Some(normalized))
    } else {
        Ok(None)
    }
}
