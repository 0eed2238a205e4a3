//! URL Utility Functions
//!
//! URL validation, resolution against the page URL, and host extraction.

use url::Url;

/// Check if a string is a valid absolute `http(s)` URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str).0 {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Resolve `url_str` against the page URL `base`.
///
/// Returns `Some` only when the result is an absolute `http(s)` URL.
#[must_use]
pub fn resolve(url_str: &str, base: &str) -> Option<String> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return None;
    }
    if is_absolute_url(url_str).0 {
        return Some(url_str.to_string());
    }

    let base = parse_url(base)?;
    let resolved = create_absolute_url(url_str, &base);
    is_absolute_url(&resolved).0.then_some(resolved)
}

/// Extract the hostname (domain) from a URL.
///
/// # Returns
/// * The hostname, or `None` if the URL is not absolute
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    parse_url(url_str).and_then(|url| url.host_str().map(ToString::to_string))
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}
