use rcgen::{
    BasicConstraints, CertificateParams, CertifiedKey, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyPair,
};
use std::fs;
use std::path::{Path, PathBuf};

/// PEM files for the server certificate and the CA that signs client certificates.
pub(crate) struct TestIdentity {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub cert_pem: String,
    pub client_ca: PathBuf,
    pub client: ClientIdentity,
}

/// A client certificate chained to the test CA, as one PEM blob (cert + key).
#[derive(Clone)]
pub(crate) struct ClientIdentity {
    pub pem: Vec<u8>,
}

pub(crate) fn write_identity(dir: &Path) -> TestIdentity {
    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
            .expect("failed to generate server certificate");

    let cert_path = dir.join("server.crt");
    let key_path = dir.join("server.key");
    fs::write(&cert_path, cert.pem()).unwrap();
    fs::write(&key_path, key_pair.serialize_pem()).unwrap();

    // Client CA
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params
        .distinguished_name
        .push(DnType::CommonName, "mediaserve test client CA");
    let ca_key = KeyPair::generate().unwrap();
    let ca_cert = ca_params.self_signed(&ca_key).unwrap();

    let ca_path = dir.join("client-ca.crt");
    fs::write(&ca_path, ca_cert.pem()).unwrap();

    // Client leaf
    let mut client_params = CertificateParams::new(vec!["player".to_string()]).unwrap();
    client_params
        .distinguished_name
        .push(DnType::CommonName, "player");
    client_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
    let client_key = KeyPair::generate().unwrap();
    let client_cert = client_params
        .signed_by(&client_key, &ca_cert, &ca_key)
        .unwrap();

    let pem = format!("{}{}", client_cert.pem(), client_key.serialize_pem()).into_bytes();

    TestIdentity {
        cert: cert_path,
        key: key_path,
        cert_pem: cert.pem(),
        client_ca: ca_path,
        client: ClientIdentity { pem },
    }
}
