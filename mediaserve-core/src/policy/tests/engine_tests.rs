use crate::conf::types::HeadersSpec;
use crate::policy::{CacheTable, CorsPolicy, ExtensionClass, HeaderPolicyEngine};
use http::HeaderName;
use pretty_assertions::assert_eq;

fn names(headers: &[(HeaderName, http::HeaderValue)]) -> Vec<&str> {
    headers.iter().map(|(n, _)| n.as_str()).collect()
}

fn value<'a>(headers: &'a [(HeaderName, http::HeaderValue)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.as_str() == name)
        .and_then(|(_, v)| v.to_str().ok())
}

#[test]
fn security_headers_without_origin() {
    // Arrange
    let engine = HeaderPolicyEngine::from_spec(&HeadersSpec::default()).unwrap();

    // Act
    let headers = engine.decorate(ExtensionClass::Other, None);

    // Assert
    assert_eq!(
        names(&headers),
        vec![
            "x-content-type-options",
            "x-frame-options",
            "strict-transport-security",
            "x-xss-protection",
            "referrer-policy",
            "cache-control",
        ]
    );
    assert_eq!(
        value(&headers, "strict-transport-security"),
        Some("max-age=31536000; includeSubDomains")
    );
    assert_eq!(value(&headers, "cache-control"), Some("public, max-age=3600"));
}

#[test]
fn cors_headers_only_with_origin() {
    // Arrange
    let engine = HeaderPolicyEngine::from_spec(&HeadersSpec::default()).unwrap();

    // Act
    let headers = engine.decorate(ExtensionClass::Media, Some("https://a.example"));

    // Assert
    assert_eq!(value(&headers, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        value(&headers, "access-control-allow-methods"),
        Some("GET, HEAD, OPTIONS")
    );
    assert_eq!(
        value(&headers, "access-control-allow-headers"),
        Some("Range, Accept-Ranges, Content-Type")
    );
    assert_eq!(
        value(&headers, "access-control-expose-headers"),
        Some("Content-Range, Content-Length, Accept-Ranges")
    );
    assert_eq!(value(&headers, "cache-control"), Some("public, max-age=31536000"));
    assert_eq!(value(&headers, "vary"), None);
}

#[test]
fn markup_is_never_cached() {
    // Arrange
    let engine = HeaderPolicyEngine::from_spec(&HeadersSpec::default()).unwrap();

    // Act
    let headers = engine.decorate(ExtensionClass::Markup, Some("https://a.example"));

    // Assert
    assert_eq!(
        value(&headers, "cache-control"),
        Some("no-store, no-cache, must-revalidate")
    );
}

#[test]
fn reflect_denied_origin_gets_vary_but_no_cors() {
    // Arrange
    let spec = HeadersSpec::default();
    let engine = HeaderPolicyEngine::new(
        600,
        CorsPolicy::Reflect {
            allowed: vec!["https://a.example".to_string()],
        },
        CacheTable::from_spec(&spec.cache).unwrap(),
    );

    // Act
    let headers = engine.decorate(ExtensionClass::Other, Some("https://evil.example"));

    // Assert
    assert_eq!(value(&headers, "access-control-allow-origin"), None);
    assert_eq!(value(&headers, "vary"), Some("Origin"));
    assert_eq!(
        value(&headers, "strict-transport-security"),
        Some("max-age=600; includeSubDomains")
    );
}
