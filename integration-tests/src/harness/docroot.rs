use std::fs;
use std::path::Path;

/// Odd size so the last 64 KiB chunk is partial.
pub const VIDEO_LEN: usize = 3 * 64 * 1024 + 1234;

/// Document root shared by the integration tests:
///
/// ```text
/// a.html
/// video.mp4
/// clip.webm
/// captions.vtt
/// notes.txt
/// .hidden
/// sub/index.html
/// docs/{zeta.txt, alpha.txt, beta/, .draft}
/// ```
pub(crate) fn write_docroot(root: &Path) {
    fs::create_dir_all(root).unwrap();

    fs::write(root.join("a.html"), "<h1>a</h1>").unwrap();
    fs::write(root.join("video.mp4"), video_bytes()).unwrap();
    fs::write(root.join("clip.webm"), b"webm").unwrap();
    fs::write(
        root.join("captions.vtt"),
        "WEBVTT\n\n00:00.000 --> 00:01.000\nhello\n",
    )
    .unwrap();
    fs::write(root.join("notes.txt"), "notes").unwrap();
    fs::write(root.join(".hidden"), "secret").unwrap();

    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/index.html"), "<h1>sub</h1>").unwrap();

    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs/zeta.txt"), "z").unwrap();
    fs::write(root.join("docs/alpha.txt"), "a").unwrap();
    fs::create_dir(root.join("docs/beta")).unwrap();
    fs::write(root.join("docs/.draft"), "draft").unwrap();
}

/// Deterministic, non-repeating within a chunk, so misordered chunks are detectable.
pub fn video_bytes() -> Vec<u8> {
    (0..VIDEO_LEN).map(|i| (i % 251) as u8).collect()
}
