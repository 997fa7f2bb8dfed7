use std::io;
use thiserror::Error;

/// Outcomes of path resolution that are not a servable target.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path would leave the document root. Answered as 404.
    #[error("path escapes the document root")]
    PathTraversalRejected,

    #[error("request path is not a valid absolute path")]
    BadPath,

    #[error("directory cannot be listed: {0}")]
    ListingDenied(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("file not found")]
    NotFound,

    #[error("file not readable")]
    Forbidden,

    #[error("file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file could not be read to the end. The response is already partially sent.
    #[error("file read failed after {written} bytes: {source}")]
    StreamRead {
        written: u64,
        #[source]
        source: io::Error,
    },

    #[error("client write failed after {written} bytes: {source}")]
    StreamWrite {
        written: u64,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Body bytes already sent when the error struck.
    pub fn bytes_written(&self) -> u64 {
        match self {
            ServeError::StreamRead { written, .. } | ServeError::StreamWrite { written, .. } => {
                *written
            }
            _ => 0,
        }
    }

    pub(crate) fn from_open(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ServeError::NotFound,
            io::ErrorKind::PermissionDenied => ServeError::Forbidden,
            _ => ServeError::Io(err),
        }
    }
}
