use crate::conf::types::TlsVersion;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while building the TLS server context. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to load certificate material from {path}: {reason}")]
    CertificateLoad { path: PathBuf, reason: String },

    #[error("client certificate CA bundle error: {reason}")]
    CaBundle {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("invalid TLS version range: min {min} > max {max}")]
    InvalidVersionRange { min: TlsVersion, max: TlsVersion },

    #[error("unknown cipher suite: {0}")]
    UnknownCipherSuite(String),

    #[error("no configured cipher suite is usable between {min} and {max}")]
    NoUsableCipherSuites { min: TlsVersion, max: TlsVersion },

    #[error("TLS configuration rejected: {0}")]
    Rustls(#[from] rustls::Error),
}

impl TlsError {
    pub fn certificate_load(path: &Path, reason: impl ToString) -> Self {
        Self::CertificateLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn ca_bundle(path: Option<&Path>, reason: impl ToString) -> Self {
        Self::CaBundle {
            path: path.map(Path::to_path_buf),
            reason: reason.to_string(),
        }
    }
}
