use super::fixture_root;
use crate::conf::types::HeadersSpec;
use crate::http::{Body, Request, RequestHandler, Response};
use crate::policy::HeaderPolicyEngine;
use crate::static_files::{PathResolver, StaticSite};
use http::header::{CACHE_CONTROL, CONTENT_TYPE, HOST, LOCATION, ORIGIN};
use http::{HeaderMap, HeaderValue, Method, StatusCode, Version};
use tempfile::{TempDir, tempdir};

fn site() -> (TempDir, StaticSite) {
    let dir = tempdir().unwrap();
    fixture_root(dir.path());
    let resolver = PathResolver::new(dir.path()).unwrap();
    let policy = HeaderPolicyEngine::from_spec(&HeadersSpec::default()).unwrap();
    (dir, StaticSite::new(resolver, policy))
}

fn get(target: &str, headers: &[(http::HeaderName, &'static str)]) -> Request {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(name.clone(), HeaderValue::from_static(*value));
    }
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.to_string(), None),
    };

    Request {
        method: Method::GET,
        target: target.to_string(),
        path,
        query,
        version: Version::HTTP_11,
        headers: map,
        peer: "127.0.0.1:50000".parse().unwrap(),
    }
}

async fn handle(site: &StaticSite, request: &Request) -> Response {
    let mut response = site.on_request(request).await;
    site.on_headers_ready(request, &mut response);
    response
}

#[tokio::test]
async fn html_file_is_not_cached() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/a.html", &[])).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "text/html");
    assert_eq!(
        response.headers[CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn media_file_is_cached_for_a_year() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/video.mp4", &[(ORIGIN, "https://a.example")])).await;

    // Assert
    assert_eq!(response.headers[CONTENT_TYPE], "video/mp4");
    assert_eq!(response.headers[CACHE_CONTROL], "public, max-age=31536000");
    assert_eq!(response.headers["access-control-allow-origin"], "*");
    assert!(matches!(response.body, Body::File { len, .. } if len == 200 * 1024));
}

#[tokio::test]
async fn directory_redirect_uses_host() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/sub?x=1", &[(HOST, "localhost:8443")])).await;

    // Assert
    assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers[LOCATION], "https://localhost:8443/sub/?x=1");
}

#[tokio::test]
async fn listing_is_markup() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/empty/", &[])).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(
        response.headers[CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );
}

#[tokio::test]
async fn traversal_is_a_plain_not_found() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/%2e%2e/%2e%2e/etc/passwd", &[])).await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let Body::Bytes(body) = &response.body else {
        panic!("expected generic body");
    };
    assert_eq!(&body[..], b"Not Found\n");
}

#[tokio::test]
async fn nul_byte_is_bad_request() {
    // Arrange
    let (_dir, site) = site();

    // Act
    let response = handle(&site, &get("/a%00.html", &[])).await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test]
fn rejections_carry_security_headers() {
    // Arrange
    let (_dir, site) = site();
    let mut response = Response::error(StatusCode::BAD_REQUEST);

    // Act
    site.on_rejection(&mut response);

    // Assert
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert!(response.headers.contains_key("x-frame-options"));
    assert!(response.headers.contains_key("strict-transport-security"));
    assert!(!response.headers.contains_key("access-control-allow-origin"));
}
