use crate::UrlError;
use url::Url;

/// Normalizes a URL for use as a crawl key
///
/// # Normalization Steps
///
/// 1. Resolve relative references against `base` when provided
/// 2. Reject non-http(s) schemes (`javascript:`, `mailto:`, `tel:`, ...)
/// 3. Remove the fragment (everything after #)
/// 4. Remove the trailing slash from non-root paths
///
/// Two links that differ only in fragment or trailing slash therefore map to
/// the same visited-set entry.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize (absolute or relative)
/// * `base` - Base URL for resolving relative references
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
pub fn normalize_url(url_str: &str, base: Option<&Url>) -> Result<Url, UrlError> {
    let mut url = match base {
        Some(base) => base
            .join(url_str)
            .map_err(|e| UrlError::Parse(format!("{url_str}: {e}")))?,
        None => Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{url_str}: {e}")))?,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    Ok(url)
}
