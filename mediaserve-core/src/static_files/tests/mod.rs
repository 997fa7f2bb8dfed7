mod handler_tests;

use std::fs;
use std::path::Path;

/// Document root used across these tests:
///
/// ```text
/// a.html
/// video.mp4
/// notes.txt
/// .secret
/// sub/index.html
/// empty/
/// ```
pub(super) fn fixture_root(root: &Path) {
    fs::write(root.join("a.html"), "<p>a</p>").unwrap();
    fs::write(root.join("video.mp4"), vec![7u8; 200 * 1024]).unwrap();
    fs::write(root.join("notes.txt"), "notes").unwrap();
    fs::write(root.join(".secret"), "hidden").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/index.html"), "<p>sub</p>").unwrap();
    fs::create_dir(root.join("empty")).unwrap();
}
