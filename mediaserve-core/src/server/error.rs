use crate::conf::ConfigError;
use crate::policy::PolicyError;
use crate::tls::TlsError;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("document root {path} is not usable: {source}")]
    DocumentRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
