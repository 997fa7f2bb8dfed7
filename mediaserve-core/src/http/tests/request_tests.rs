use crate::http::{Request, RequestError, parse_request_head};
use http::{Method, Version};
use pretty_assertions::assert_eq;
use std::net::SocketAddr;

fn peer() -> SocketAddr {
    "10.0.0.1:40000".parse().unwrap()
}

fn parse(raw: &str) -> Request {
    let (request, consumed) = parse_request_head(raw.as_bytes(), peer()).unwrap().unwrap();
    assert_eq!(consumed, raw.len());
    request
}

#[test]
fn parse_simple_get() {
    // Act
    let request = parse("GET /media/a.mp4?t=10#frag HTTP/1.1\r\nHost: example.com\r\nOrigin: https://x.example\r\n\r\n");

    // Assert
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.target, "/media/a.mp4?t=10#frag");
    assert_eq!(request.path, "/media/a.mp4");
    assert_eq!(request.query.as_deref(), Some("t=10"));
    assert_eq!(request.version, Version::HTTP_11);
    assert_eq!(request.host(), Some("example.com"));
    assert_eq!(request.origin(), Some("https://x.example"));
    assert_eq!(request.peer, peer());
}

#[test]
fn header_names_are_case_insensitive() {
    // Act
    let request = parse("GET / HTTP/1.1\r\nhOsT: a\r\nORIGIN: b\r\n\r\n");

    // Assert
    assert_eq!(request.host(), Some("a"));
    assert_eq!(request.origin(), Some("b"));
}

#[test]
fn partial_head_needs_more_bytes() {
    // Act
    let result = parse_request_head(b"GET / HTTP/1.1\r\nHost: a\r\n", peer()).unwrap();

    // Assert
    assert!(result.is_none());
}

#[test]
fn pipelined_requests_report_consumed_bytes() {
    // Arrange
    let first = "GET /a HTTP/1.1\r\nHost: a\r\n\r\n";
    let raw = format!("{first}GET /b HTTP/1.1\r\n\r\n");

    // Act
    let (request, consumed) = parse_request_head(raw.as_bytes(), peer()).unwrap().unwrap();

    // Assert
    assert_eq!(request.path, "/a");
    assert_eq!(consumed, first.len());
}

#[test]
fn garbage_is_malformed() {
    // Act
    let result = parse_request_head(b"\x01\x02 nonsense\r\n\r\n", peer());

    // Assert
    assert!(matches!(result, Err(RequestError::Malformed(_))));
}

#[test]
fn too_many_headers() {
    // Arrange
    let mut raw = String::from("GET / HTTP/1.1\r\n");
    for i in 0..100 {
        raw.push_str(&format!("X-H{i}: v\r\n"));
    }
    raw.push_str("\r\n");

    // Act
    let result = parse_request_head(raw.as_bytes(), peer());

    // Assert
    assert_eq!(result.unwrap_err(), RequestError::TooManyHeaders);
}

#[test]
fn keep_alive_rules() {
    assert!(parse("GET / HTTP/1.1\r\n\r\n").wants_keep_alive());
    assert!(!parse("GET / HTTP/1.1\r\nConnection: close\r\n\r\n").wants_keep_alive());
    assert!(!parse("GET / HTTP/1.0\r\n\r\n").wants_keep_alive());
    assert!(parse("GET / HTTP/1.0\r\nConnection: Keep-Alive\r\n\r\n").wants_keep_alive());
}

#[test]
fn body_detection() {
    assert!(!parse("GET / HTTP/1.1\r\n\r\n").has_body());
    assert!(!parse("GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n").has_body());
    assert!(parse("POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\n").has_body());
    assert!(parse("POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n").has_body());
}

#[test]
fn empty_host_is_ignored() {
    assert_eq!(parse("GET / HTTP/1.1\r\nHost: \r\n\r\n").host(), None);
}

#[test]
fn absolute_form_target_is_reduced_to_its_path() {
    // Act
    let request = parse("GET https://media.example:8443/a.html?x=1 HTTP/1.1\r\nHost: other\r\n\r\n");

    // Assert
    assert_eq!(request.target, "https://media.example:8443/a.html?x=1");
    assert_eq!(request.path, "/a.html");
    assert_eq!(request.query.as_deref(), Some("x=1"));
    assert_eq!(request.host(), Some("media.example:8443"));
}

#[test]
fn absolute_form_without_path_is_root() {
    // Act
    let request = parse("GET http://media.example HTTP/1.1\r\n\r\n");

    // Assert
    assert_eq!(request.path, "/");
    assert_eq!(request.host(), Some("media.example"));
}
