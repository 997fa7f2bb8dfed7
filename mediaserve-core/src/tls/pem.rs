use crate::tls::TlsError;
use rustls::RootCertStore;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let file = File::open(path).map_err(|e| TlsError::certificate_load(path, e))?;
    let mut reader = BufReader::new(file);

    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TlsError::certificate_load(path, e))?;

    if certs.is_empty() {
        return Err(TlsError::certificate_load(path, "no PEM certificates found"));
    }

    Ok(certs)
}

pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let file = File::open(path).map_err(|e| TlsError::certificate_load(path, e))?;
    let mut reader = BufReader::new(file);

    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| TlsError::certificate_load(path, e))?
        .ok_or_else(|| TlsError::certificate_load(path, "no PEM private key found"))
}

/// Load every certificate in a PEM bundle as a trust anchor.
pub fn load_ca_bundle(path: &Path) -> Result<RootCertStore, TlsError> {
    let file = File::open(path).map_err(|e| TlsError::ca_bundle(Some(path), e))?;
    let mut reader = BufReader::new(file);

    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut reader) {
        let cert = cert.map_err(|e| TlsError::ca_bundle(Some(path), e))?;
        roots
            .add(cert)
            .map_err(|e| TlsError::ca_bundle(Some(path), e))?;
    }

    if roots.is_empty() {
        return Err(TlsError::ca_bundle(Some(path), "no CA certificates found"));
    }

    Ok(roots)
}
