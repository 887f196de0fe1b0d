//! Request header helpers
//!
//! Content negotiation checks used when deciding how to serve a resource.

use hyper::header::{HeaderMap, ACCEPT_ENCODING};

/// Case-insensitive prefix check
///
/// Two `None`s are equal; a single `None` never matches.
///
/// # Examples
/// ```
/// use sass_bridge::http::header::starts_with_ignore_case;
/// assert!(starts_with_ignore_case(Some("abcdef"), Some("ABC")));
/// assert!(starts_with_ignore_case(None, None));
/// assert!(!starts_with_ignore_case(None, Some("abc")));
/// ```
pub fn starts_with_ignore_case(s: Option<&str>, prefix: Option<&str>) -> bool {
    let (Some(s), Some(prefix)) = (s, prefix) else {
        return s.is_none() && prefix.is_none();
    };
    let mut chars = s.chars();
    prefix.chars().all(|p| chars.next().is_some_and(|c| chars_eq_ignore_case(c, p)))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

/// Whether any value of header `name` contains `value`
///
/// Values that are not valid visible ASCII are skipped.
pub fn header_contains(headers: &HeaderMap, name: &str, value: &str) -> bool {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(value))
}

/// Whether the client accepts gzip-encoded responses
pub fn is_gzip_supported(headers: &HeaderMap) -> bool {
    header_contains(headers, ACCEPT_ENCODING.as_str(), "gzip")
}
