//! Conditional-GET helpers for etagged responses.

use axum::http::{HeaderMap, HeaderValue, header};

/// Wrap a raw digest as a strong entity tag.
#[must_use]
pub fn quoted(etag: &str) -> String {
    format!("\"{etag}\"")
}

/// Whether any `If-None-Match` header value matches `etag` (a raw digest).
///
/// Weak tags compare equal to the strong tag with the same value, as the
/// weak comparison for `If-None-Match` requires.
#[must_use]
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    let expected = quoted(etag);
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == expected
        })
}

/// Attach `ETag` and `Cache-Control` for a response whose tag may be absent.
///
/// Without a tag the response must not be stored at all.
pub fn put_cache_headers(headers: &mut HeaderMap, etag: Option<&str>) {
    match etag {
        Some(etag) => {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            if let Ok(value) = HeaderValue::from_str(&quoted(etag)) {
                headers.insert(header::ETAG, value);
            }
        }
        None => {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_if_none_match(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(header::IF_NONE_MATCH, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_exact_match() {
        assert!(if_none_match(&with_if_none_match(&["\"abc\""]), "abc"));
        assert!(!if_none_match(&with_if_none_match(&["\"abd\""]), "abc"));
    }

    #[test]
    fn test_unquoted_value_does_not_match() {
        assert!(!if_none_match(&with_if_none_match(&["abc"]), "abc"));
    }

    #[test]
    fn test_list_weak_and_wildcard() {
        assert!(if_none_match(&with_if_none_match(&["\"x\", W/\"abc\""]), "abc"));
        assert!(if_none_match(&with_if_none_match(&["\"x\"", "\"abc\""]), "abc"));
        assert!(if_none_match(&with_if_none_match(&["*"]), "abc"));
    }

    #[test]
    fn test_missing_header() {
        assert!(!if_none_match(&HeaderMap::new(), "abc"));
    }

    #[test]
    fn test_cache_headers() {
        let mut headers = HeaderMap::new();
        put_cache_headers(&mut headers, Some("abc"));
        assert_eq!(headers[header::ETAG], "\"abc\"");
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");

        let mut headers = HeaderMap::new();
        put_cache_headers(&mut headers, None);
        assert!(headers.get(header::ETAG).is_none());
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    }
}
