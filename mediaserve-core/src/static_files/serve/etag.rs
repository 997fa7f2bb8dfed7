use crate::static_files::ConditionalHeaders;
use httpdate::parse_http_date;
use std::fs::Metadata;
use std::time::SystemTime;

/// Cache validators derived from a file's metadata.
#[derive(Debug)]
pub(crate) struct FileValidators {
    /// Weak: `W/"size-mtime"` in hex.
    pub etag: String,
    pub modified: Option<SystemTime>,
}

impl FileValidators {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let modified = metadata.modified().ok();
        let mtime_secs = modified
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_secs());

        Self {
            etag: format!("W/\"{:x}-{:x}\"", metadata.len(), mtime_secs),
            modified,
        }
    }

    /// True when the client's copy is current. `If-None-Match` wins over `If-Modified-Since`.
    pub fn client_is_fresh(&self, conditional: &ConditionalHeaders) -> bool {
        match (
            conditional.if_none_match.as_deref(),
            conditional.if_modified_since.as_deref(),
        ) {
            (Some(list), _) => self.etag_listed(list),
            (None, Some(date)) => !self.modified_after(date),
            (None, None) => false,
        }
    }

    /// Weak comparison against an `If-None-Match` list.
    fn etag_listed(&self, if_none_match: &str) -> bool {
        if if_none_match.trim() == "*" {
            return true;
        }

        let ours = self.etag.strip_prefix("W/").unwrap_or(&self.etag);
        if_none_match.split(',').any(|candidate| {
            let candidate = candidate.trim();
            candidate.strip_prefix("W/").unwrap_or(candidate) == ours
        })
    }

    /// Unknown mtimes and unparsable dates count as modified.
    fn modified_after(&self, if_modified_since: &str) -> bool {
        let (Some(file_time), Ok(since)) = (self.modified, parse_http_date(if_modified_since))
        else {
            return true;
        };

        // HTTP dates have one second resolution.
        file_time
            .duration_since(since)
            .is_ok_and(|delta| delta.as_secs() >= 1)
    }
}
