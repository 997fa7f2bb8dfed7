use crate::static_files::ResolveError;
use percent_encoding::percent_decode_str;

/// A decoded request path with every dot-segment removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    segments: Vec<String>,
}

impl NormalizedPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Display form, always starting and ending with `/`.
    pub fn as_directory(&self) -> String {
        let mut out = String::from("/");
        for segment in &self.segments {
            out.push_str(segment);
            out.push('/');
        }
        out
    }
}

/// Percent-decode once, then collapse `.`, `..` and empty segments.
///
/// Rejects NUL bytes and invalid UTF-8 as `BadPath`, and any `..` that would
/// climb above the root as `PathTraversalRejected`.
pub fn normalize_request_path(raw: &str) -> Result<NormalizedPath, ResolveError> {
    if !raw.starts_with('/') {
        return Err(ResolveError::BadPath);
    }

    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| ResolveError::BadPath)?;

    if decoded.contains('\0') {
        return Err(ResolveError::BadPath);
    }

    let mut stack: Vec<String> = Vec::new();

    // Backslash counts as a separator too.
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(ResolveError::PathTraversalRejected);
                }
            }
            _ => stack.push(segment.to_string()),
        }
    }

    Ok(NormalizedPath { segments: stack })
}
