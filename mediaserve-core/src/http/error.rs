use crate::static_files::ServeError;
use thiserror::Error;

/// Reasons a connection worker stops early. None of them affect other connections.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stream(#[from] ServeError),
}
