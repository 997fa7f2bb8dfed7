
use crate::conf::types::TlsSpec;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Self-signed identity for `localhost` written as PEM files into `dir`.
pub(super) fn write_identity(dir: &Path, name: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();

    let cert_path = dir.join(format!("{name}.crt"));
    let key_path = dir.join(format!("{name}.key"));
    fs::write(&cert_path, cert.pem()).unwrap();
    fs::write(&key_path, key_pair.serialize_pem()).unwrap();

    (cert_path, key_path)
}

pub(super) fn tls_spec(dir: &TempDir) -> TlsSpec {
    let (cert, key) = write_identity(dir.path(), "server");
    TlsSpec {
        cert,
        key,
        ..Default::default()
    }
}
