use integration_tests::harness::TestServer;
use pretty_assertions::assert_eq;

fn get(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
}

#[test]
fn traversal_never_escapes_document_root() {
    let srv = TestServer::start("default");

    for path in [
        "/../../etc/passwd",
        "/%2e%2e/%2e%2e/etc/passwd",
        "/sub/../../server.key",
        "/..%2f..%2fserver.key",
        "/%2e%2e%5cserver.key",
    ] {
        let res = srv.raw(&get(path));

        assert!(
            res.status == 404 || res.status == 400,
            "{path} answered {}",
            res.status
        );
        assert!(!res.text.contains("root:"), "{path} leaked /etc/passwd");
        assert!(!res.text.contains("PRIVATE KEY"), "{path} leaked the key");
    }
}

#[test]
fn security_headers_are_always_present() {
    let srv = TestServer::start("default");

    for path in ["/a.html", "/nope", "/sub"] {
        let res = srv.raw(&get(path));

        assert_eq!(res.header("x-content-type-options"), Some("nosniff"), "{path}");
        assert_eq!(res.header("x-frame-options"), Some("SAMEORIGIN"), "{path}");
        assert_eq!(
            res.header("strict-transport-security"),
            Some("max-age=31536000; includeSubDomains"),
            "{path}"
        );
    }
}

#[test]
fn options_bypasses_resolution() {
    let srv = TestServer::start("default");

    let res = srv.raw(
        "OPTIONS /does/not/exist.mp4 HTTP/1.1\r\nHost: localhost\r\nOrigin: https://player.example\r\nConnection: close\r\n\r\n",
    );

    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-length"), Some("0"));
    assert!(res.body.is_empty());
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        res.header("access-control-allow-methods"),
        Some("GET, HEAD, OPTIONS")
    );
    assert_eq!(
        res.header("access-control-allow-headers"),
        Some("Range, Accept-Ranges, Content-Type")
    );
}

#[test]
fn cors_headers_require_origin() {
    let srv = TestServer::start("default");

    let res = srv.raw(&get("/a.html"));

    assert_eq!(res.status, 200);
    assert!(res.header("access-control-allow-origin").is_none());
}

#[test]
fn unsupported_methods_are_rejected() {
    let srv = TestServer::start("default");

    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        let res = srv.raw(&format!(
            "{method} /a.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        ));

        assert_eq!(res.status, 405, "{method}");
        assert_eq!(res.header("allow"), Some("GET, HEAD, OPTIONS"), "{method}");
    }
}

#[test]
fn keep_alive_serves_sequential_requests() {
    let srv = TestServer::start("default");

    let res = srv.raw(
        "GET /notes.txt HTTP/1.1\r\nHost: localhost\r\n\r\n\
         GET /a.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );

    assert_eq!(res.response_count(), 2);
    assert!(res.text.contains("notes"));
    assert!(res.text.ends_with("<h1>a</h1>"));
}

#[test]
fn malformed_request_is_bad_request() {
    let srv = TestServer::start("default");

    let res = srv.raw("NOT A REQUEST\r\n\r\n");

    assert_eq!(res.status, 400);
    assert_eq!(res.header("connection"), Some("close"));
    assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
    assert!(res.header("x-frame-options").is_some());
    assert!(res.header("strict-transport-security").is_some());
}

#[test]
fn absolute_form_target_is_served() {
    let srv = TestServer::start("default");

    let res = srv.raw("GET https://localhost/a.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");

    assert_eq!(res.status, 200);
    assert!(res.text.ends_with("<h1>a</h1>"));
}
