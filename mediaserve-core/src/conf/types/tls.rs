use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Cipher suites offered when the config does not name any, in preference order.
pub const DEFAULT_CIPHER_SUITES: &[&str] = &[
    "TLS13_AES_128_GCM_SHA256",
    "TLS13_AES_256_GCM_SHA384",
    "TLS13_CHACHA20_POLY1305_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256",
    "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",
];

/// Paths are validated during config validation and loaded by the TLS context builder.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Certificate chain (PEM).
    pub cert: PathBuf,

    /// Private key (PEM).
    pub key: PathBuf,

    pub min_version: TlsVersion,
    pub max_version: TlsVersion,

    /// Ordered preference list of IANA cipher suite names.
    pub cipher_suites: Vec<String>,

    /// Client certificate verification. Off unless the block is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_auth: Option<ClientAuthSpec>,
}

impl Default for TlsSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("tls"),
            cert: PathBuf::from("./ssl/certificate.crt"),
            key: PathBuf::from("./ssl/private.key"),
            min_version: TlsVersion::Tls12,
            max_version: TlsVersion::Tls13,
            cipher_suites: DEFAULT_CIPHER_SUITES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            client_auth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientAuthSpec {
    /// CA bundle used to validate client certificate chains.
    pub ca_file: Option<PathBuf>,

    /// Reject handshakes that do not present a certificate.
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum TlsVersion {
    #[serde(rename = "1.2")]
    Tls12,
    #[serde(rename = "1.3")]
    Tls13,
}

impl fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsVersion::Tls12 => write!(f, "TLSv1.2"),
            TlsVersion::Tls13 => write!(f, "TLSv1.3"),
        }
    }
}
