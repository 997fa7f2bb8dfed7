use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::io;
use std::path::Path;

/// One visible entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Enumerate `dir` for a listing: dotfiles and non UTF-8 names hidden,
/// sorted lexicographically by name.
pub fn read_directory_entries(dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };

        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks, so a link to a directory lists as one.
        let is_dir = entry.path().is_dir();
        entries.push(DirectoryEntry { name, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render a listing page. Pure: only the given entries are used.
///
/// A parent link is emitted unless `display_path` is the root.
pub fn render_listing(display_path: &str, entries: &[DirectoryEntry]) -> Bytes {
    let mut html = String::with_capacity(512 + entries.len() * 96);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");

    html.push_str("<title>Index of ");
    html.push_str(&escape_html(display_path));
    html.push_str("</title>\n");

    html.push_str("</head>\n<body>\n");

    html.push_str("<h1>Index of ");
    html.push_str(&escape_html(display_path));
    html.push_str("</h1>\n");

    html.push_str("<ul>\n");

    if display_path != "/" {
        html.push_str("<li class=\"dir\"><a href=\"../\">../</a></li>\n");
    }

    for entry in entries {
        let (class, suffix) = if entry.is_dir {
            ("dir", "/")
        } else {
            ("file", "")
        };

        html.push_str("<li class=\"");
        html.push_str(class);
        html.push_str("\"><a href=\"");
        html.push_str(&escape_href(&entry.name));
        html.push_str(suffix);
        html.push_str("\">");
        html.push_str(&escape_html(&entry.name));
        html.push_str(suffix);
        html.push_str("</a></li>\n");
    }

    html.push_str("</ul>\n");
    html.push_str("</body>\n</html>\n");

    Bytes::from(html)
}

/// Minimal HTML escaping (sufficient for filenames)
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a single path segment for an href attribute.
fn escape_href(input: &str) -> String {
    const SEGMENT: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'\'')
        .add(b'<')
        .add(b'>')
        .add(b'`')
        .add(b'#')
        .add(b'?')
        .add(b'%')
        .add(b'/')
        .add(b'\\')
        .add(b':');

    utf8_percent_encode(input, SEGMENT).to_string()
}
