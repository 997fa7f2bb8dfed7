use crate::conf::types::TlsVersion;
use rustls::SupportedCipherSuite;
use rustls::SupportedProtocolVersion;
use rustls::crypto::ring::ALL_CIPHER_SUITES;

/// Look up a ring-backed cipher suite by its IANA name, e.g. `TLS13_AES_128_GCM_SHA256`.
pub fn cipher_suite_by_name(name: &str) -> Option<SupportedCipherSuite> {
    ALL_CIPHER_SUITES
        .iter()
        .copied()
        .find(|suite| suite_name(suite).eq_ignore_ascii_case(name))
}

pub fn suite_name(suite: &SupportedCipherSuite) -> String {
    format!("{:?}", suite.suite())
}

pub fn protocol_version(version: TlsVersion) -> &'static SupportedProtocolVersion {
    match version {
        TlsVersion::Tls12 => &rustls::version::TLS12,
        TlsVersion::Tls13 => &rustls::version::TLS13,
    }
}

pub fn suite_supports_version(suite: &SupportedCipherSuite, version: TlsVersion) -> bool {
    suite.version().version == protocol_version(version).version
}
