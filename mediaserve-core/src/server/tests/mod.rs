mod setup_tests;

use crate::conf::types::{BindSpec, MediaserveConfig, ServerSpec, TlsSpec};
use crate::server::Server;
use crate::tls::load_certs;
use rustls::crypto::ring;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

/// Temp dir holding `www/` and a self-signed identity for `localhost`.
pub(super) struct Fixture {
    pub dir: TempDir,
    pub config: MediaserveConfig,
}

pub(super) fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("www");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("hello.txt"), "hello over tls").unwrap();

    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_path = dir.path().join("server.crt");
    let key_path = dir.path().join("server.key");
    fs::write(&cert_path, cert.pem()).unwrap();
    fs::write(&key_path, key_pair.serialize_pem()).unwrap();

    let config = MediaserveConfig {
        server: ServerSpec {
            root_dir: root,
            ..Default::default()
        },
        bind: BindSpec {
            interface: "loopback".to_string(),
            port: 0,
            ..Default::default()
        },
        tls: TlsSpec {
            cert: cert_path,
            key: key_path,
            ..Default::default()
        },
        ..Default::default()
    };

    Fixture { dir, config }
}

/// Bind and serve in the background. Sending on the returned channel stops the accept loop.
pub(super) async fn start(config: &MediaserveConfig) -> (SocketAddr, oneshot::Sender<()>) {
    let bound = Server::from_config(config).unwrap().bind().await.unwrap();
    let addr = bound.local_addr();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(bound.serve(async move {
        let _ = rx.await;
    }));

    (addr, tx)
}

/// Client trusting exactly the fixture certificate.
pub(super) fn connector(config: &MediaserveConfig) -> TlsConnector {
    let mut roots = RootCertStore::empty();
    for cert in load_certs(&config.tls.cert).unwrap() {
        roots.add(cert).unwrap();
    }

    let mut client = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(roots)
        .with_no_client_auth();
    client.alpn_protocols = vec![b"http/1.1".to_vec()];

    TlsConnector::from(Arc::new(client))
}

pub(super) async fn connect(
    connector: &TlsConnector,
    addr: SocketAddr,
) -> std::io::Result<TlsStream<TcpStream>> {
    let tcp = TcpStream::connect(addr).await?;
    let name = ServerName::try_from("localhost").unwrap();
    connector.connect(name, tcp).await
}

/// One `Connection: close` GET, returning the raw response text.
pub(super) async fn get(stream: &mut TlsStream<TcpStream>, path: &str) -> String {
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8_lossy(&out).into_owned()
}
