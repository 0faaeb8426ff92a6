//! Target URL derivation.
//!
//! The relay runs in full-URL-in-path mode: the inbound path and query,
//! minus the leading slash, are the outbound URL. A non-empty `url` query
//! parameter overrides the path form; an empty one is treated as absent.

use axum::http::Uri;

/// Extract a non-empty `url` query parameter, percent-decoded.
pub fn url_param(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "url" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Derive the outbound target URL from an inbound request URI.
///
/// `/https://api.1inch.dev/quote?src=1` → `https://api.1inch.dev/quote?src=1`
/// `/?url=https%3A%2F%2Fapi.1inch.dev%2Fquote` → `https://api.1inch.dev/quote`
///
/// Returns `None` when nothing target-like is present; the caller decides
/// whether that means the health endpoint or a client error.
pub fn derive_target(uri: &Uri) -> Option<String> {
    if let Some(url) = url_param(uri) {
        return Some(url);
    }

    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let raw = raw.strip_prefix('/').unwrap_or(raw);

    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
