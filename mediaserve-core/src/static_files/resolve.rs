use crate::static_files::serve::{DirectoryEntry, read_directory_entries};
use crate::static_files::{ResolveError, content_type_for, normalize_request_path};
use std::io;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// What a request path refers to beneath the document root.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    File {
        path: PathBuf,
        content_type: String,
    },
    /// 301 to the directory with a trailing slash.
    Redirect { location: String },
    DirectoryListing {
        /// Decoded path shown in the listing, ending with `/`.
        display_path: String,
        entries: Vec<DirectoryEntry>,
    },
    NotFound,
}

/// Maps request paths onto the filesystem without ever leaving the document root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// The root is canonicalized once; containment checks compare against it.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `raw_path` (percent-encoded, without query) to a target.
    ///
    /// `host` and `query` only shape the `Location` of directory redirects.
    pub fn resolve(
        &self,
        raw_path: &str,
        host: Option<&str>,
        query: Option<&str>,
    ) -> Result<ResolvedTarget, ResolveError> {
        let normalized = normalize_request_path(raw_path)?;

        let mut candidate = self.root.clone();
        candidate.extend(normalized.segments());

        let Some(target) = self.contained(&candidate)? else {
            return Ok(ResolvedTarget::NotFound);
        };

        if target.is_dir() {
            if !normalized.is_root() && !raw_path.ends_with('/') {
                return Ok(ResolvedTarget::Redirect {
                    location: redirect_location(raw_path, host, query),
                });
            }

            let index = target.join(INDEX_FILE);
            if let Some(index) = self.contained(&index)?
                && index.is_file()
            {
                return Ok(ResolvedTarget::File {
                    content_type: content_type_for(&index),
                    path: index,
                });
            }

            let entries = read_directory_entries(&target).map_err(ResolveError::ListingDenied)?;
            return Ok(ResolvedTarget::DirectoryListing {
                display_path: normalized.as_directory(),
                entries,
            });
        }

        // A trailing slash names a directory; files do not have one.
        if target.is_file() && !raw_path.ends_with('/') {
            return Ok(ResolvedTarget::File {
                content_type: content_type_for(&target),
                path: target,
            });
        }

        Ok(ResolvedTarget::NotFound)
    }

    /// Canonicalize `path` and enforce containment. `None` when it does not exist.
    fn contained(&self, path: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let canonical = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => return Ok(None),
        };

        // Symlinks may point anywhere; only the canonical location counts.
        if !canonical.starts_with(&self.root) {
            return Err(ResolveError::PathTraversalRejected);
        }

        Ok(Some(canonical))
    }
}

/// `https://{host}{path}/` when the host looks sane, otherwise a same-origin relative path.
fn redirect_location(raw_path: &str, host: Option<&str>, query: Option<&str>) -> String {
    let mut location = match host.filter(|h| is_valid_host(h)) {
        Some(host) => format!("https://{host}{raw_path}/"),
        // Collapse leading slashes so the Location cannot become protocol-relative.
        None => format!("/{}/", raw_path.trim_start_matches('/')),
    };

    if let Some(query) = query {
        location.push('?');
        location.push_str(query);
    }

    location
}

fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b':' | b'[' | b']'))
}
