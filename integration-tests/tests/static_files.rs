use integration_tests::harness::{TestServer, VIDEO_LEN, video_bytes};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use reqwest::header::{
    CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, IF_NONE_MATCH, LAST_MODIFIED, LOCATION,
};

#[test]
fn serves_html_without_caching() {
    let srv = TestServer::start("default");

    let res = srv.get("/a.html").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
    assert_eq!(
        res.headers()[CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );
    assert_eq!(res.text().unwrap(), "<h1>a</h1>");
}

#[test]
fn directory_without_slash_redirects_once() {
    let srv = TestServer::start("default");
    let client = srv.no_redirect_client();

    let res = client.get(srv.url("/sub")).send().unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    let location = res.headers()[LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, srv.url("/sub/"));

    let followed = client.get(&location).send().unwrap();
    assert_eq!(followed.status(), StatusCode::OK);
    assert_eq!(followed.text().unwrap(), "<h1>sub</h1>");
}

#[test]
fn redirect_preserves_query() {
    let srv = TestServer::start("default");

    let res = srv
        .no_redirect_client()
        .get(srv.url("/docs?sort=name"))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], srv.url("/docs/?sort=name").as_str());
}

#[test]
fn serves_video_with_long_lived_cache() {
    let srv = TestServer::start("default");

    let res = srv.get("/video.mp4").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "video/mp4");
    assert_eq!(res.headers()[CACHE_CONTROL], "public, max-age=31536000");
    assert_eq!(res.headers()[CONTENT_LENGTH], VIDEO_LEN.to_string().as_str());
    assert!(res.headers().contains_key(LAST_MODIFIED));
    assert!(res.headers().get("accept-ranges").is_none());

    let body = res.bytes().unwrap();
    assert_eq!(body.len(), VIDEO_LEN);
    assert!(body[..] == video_bytes()[..], "video body differs from file");
}

#[test]
fn cache_control_follows_extension_class() {
    let srv = TestServer::start("default");

    let cases = [
        ("/clip.webm", "video/webm", "public, max-age=31536000"),
        ("/captions.vtt", "text/vtt", "public, max-age=3600"),
        ("/notes.txt", "text/plain", "public, max-age=3600"),
        ("/a.html", "text/html", "no-store, no-cache, must-revalidate"),
    ];

    for (path, content_type, cache) in cases {
        let res = srv.get(path).send().unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert_eq!(res.headers()[CONTENT_TYPE], content_type, "{path}");
        assert_eq!(res.headers()[CACHE_CONTROL], cache, "{path}");
    }
}

#[test]
fn matching_etag_yields_not_modified() {
    let srv = TestServer::start("default");
    let etag = srv.get("/notes.txt").send().unwrap().headers()[ETAG].clone();

    let res = srv
        .get("/notes.txt")
        .header(IF_NONE_MATCH, etag)
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    assert!(res.bytes().unwrap().is_empty());
}

#[test]
fn head_reports_length_without_body() {
    let srv = TestServer::start("default");

    let res = srv.head("/video.mp4").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_LENGTH], VIDEO_LEN.to_string().as_str());
    assert!(res.bytes().unwrap().is_empty());
}

#[test]
fn missing_file_is_generic_not_found() {
    let srv = TestServer::start("default");

    let res = srv.get("/nope.mp4").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.text().unwrap();
    assert_eq!(body, "Not Found\n");
    assert!(!body.contains(srv.root().to_str().unwrap()));
}

#[test]
fn root_without_index_lists_directory() {
    let srv = TestServer::start("default");

    let res = srv.get("/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    let body = res.text().unwrap();
    assert!(body.contains(r#"<a href="a.html">a.html</a>"#));
    assert!(!body.contains("../"));
}
