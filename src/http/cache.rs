//! HTTP cache control.
//!
//! Decides `Cache-Control` and `ETag` for list responses and answers
//! conditional GETs.

use axum::http::StatusCode;
use sha2::{Digest, Sha256};

use crate::config::CacheConfig;

/// `Cache-Control` value for anything that must not be cached.
pub const NO_STORE: &str = "no-store";

/// Whether a route may be cached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cacheability {
    /// GET routes: cacheable when the response is a success.
    Cacheable,
    /// POST routes: never cached.
    NoStore,
}

/// Headers to attach to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirectives {
    pub cache_control: String,
    pub etag: Option<String>,
}

impl CacheDirectives {
    fn no_store() -> Self {
        Self {
            cache_control: NO_STORE.to_string(),
            etag: None,
        }
    }
}

/// Cache header policy for the list routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    ttl_secs: u64,
}

impl CachePolicy {
    pub fn new(ttl_secs: u64) -> Self {
        Self { ttl_secs }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl_secs)
    }

    /// `Cache-Control` value for cacheable successes.
    pub fn public_header(&self) -> String {
        format!("public, max-age={0}, s-maxage={0}", self.ttl_secs)
    }

    /// Compute headers for a response with the given serialized `body`.
    ///
    /// Only a 200 on a cacheable route gets an ETag and a public
    /// `Cache-Control`; everything else is `no-store`.
    pub fn directives(&self, route: Cacheability, status: StatusCode, body: &[u8]) -> CacheDirectives {
        if route == Cacheability::Cacheable && status == StatusCode::OK {
            CacheDirectives {
                cache_control: self.public_header(),
                etag: Some(generate_etag(body)),
            }
        } else {
            CacheDirectives::no_store()
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// Generate an `ETag`: unquoted lowercase hex SHA-256 of `content`.
pub fn generate_etag(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Check if a client's `If-None-Match` header matches the server's `ETag`.
///
/// Supports:
/// - Single tag, quoted or bare: `"abc123"`, `abc123`
/// - Multiple tags: `"abc123", "def456"`
/// - Weak tags: `W/"abc123"`
/// - Wildcard: `*`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header.split(',').map(str::trim).any(|candidate| {
            if candidate == "*" {
                return true;
            }
            let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
            candidate.trim_matches('"') == etag
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag_is_sha256_hex() {
        // sha256("")
        assert_eq!(
            generate_etag(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(generate_etag(b"same"), generate_etag(b"same"));
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_public_header() {
        assert_eq!(
            CachePolicy::new(60).public_header(),
            "public, max-age=60, s-maxage=60"
        );
        assert_eq!(CachePolicy::default(), CachePolicy::new(60));
    }

    #[test]
    fn test_cacheable_success() {
        let policy = CachePolicy::new(30);
        let body = br#"{"result":["a"]}"#;
        let d = policy.directives(Cacheability::Cacheable, StatusCode::OK, body);
        assert_eq!(d.cache_control, "public, max-age=30, s-maxage=30");
        assert_eq!(d.etag.as_deref(), Some(generate_etag(body).as_str()));
    }

    #[test]
    fn test_no_store_cases() {
        let policy = CachePolicy::new(30);
        let body = br#"{"error":"x"}"#;
        for (route, status) in [
            (Cacheability::Cacheable, StatusCode::BAD_REQUEST),
            (Cacheability::NoStore, StatusCode::OK),
            (Cacheability::NoStore, StatusCode::BAD_REQUEST),
        ] {
            let d = policy.directives(route, status, body);
            assert_eq!(d.cache_control, "no-store");
            assert_eq!(d.etag, None);
        }
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "abc123";
        assert!(check_etag_match(Some("abc123"), etag));
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
