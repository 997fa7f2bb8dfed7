use std::path::Path;

/// Content type for a served file: a fixed table for the media this server
/// exists for, then a best-effort guess.
pub fn content_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let fixed = match ext.as_deref() {
        Some("html" | "htm") => Some("text/html"),
        Some("mp4") => Some("video/mp4"),
        Some("webm") => Some("video/webm"),
        Some("ogg") => Some("video/ogg"),
        Some("vtt") => Some("text/vtt"),
        _ => None,
    };

    match fixed {
        Some(ct) => ct.to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
