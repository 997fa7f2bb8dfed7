use super::{connect, connector, fixture, get, start};
use crate::server::{Server, ServerError};
use crate::tls::TlsError;
use std::time::Duration;
use tokio::net::TcpStream;

#[test]
fn from_config_fails_on_missing_certificate() {
    // Arrange
    let mut fx = fixture();
    fx.config.tls.cert = fx.dir.path().join("missing.crt");

    // Act
    let result = Server::from_config(&fx.config);

    // Assert
    assert!(matches!(
        result,
        Err(ServerError::Tls(TlsError::CertificateLoad { .. }))
    ));
}

#[test]
fn from_config_fails_on_missing_document_root() {
    // Arrange
    let mut fx = fixture();
    fx.config.server.root_dir = fx.dir.path().join("nope");

    // Act
    let result = Server::from_config(&fx.config);

    // Assert
    assert!(matches!(result, Err(ServerError::DocumentRoot { .. })));
}

#[test]
fn from_config_resolves_bind_address() {
    // Arrange
    let fx = fixture();

    // Act
    let server = Server::from_config(&fx.config).unwrap();

    // Assert
    assert!(server.addr().ip().is_loopback());
    assert_eq!(server.tls().cipher_suites().len(), 9);
}

#[tokio::test]
async fn bind_reports_ephemeral_port() {
    // Arrange
    let fx = fixture();

    // Act
    let bound = Server::from_config(&fx.config).unwrap().bind().await.unwrap();

    // Assert
    assert_ne!(bound.local_addr().port(), 0);
}

#[tokio::test]
async fn bind_conflict_is_reported() {
    // Arrange
    let mut fx = fixture();
    let first = Server::from_config(&fx.config).unwrap().bind().await.unwrap();
    fx.config.bind.port = first.local_addr().port();

    // Act
    let second = Server::from_config(&fx.config).unwrap().bind().await;

    // Assert
    assert!(matches!(second, Err(ServerError::Bind { .. })));
}

#[tokio::test]
async fn shutdown_closes_listening_socket() {
    // Arrange
    let fx = fixture();
    let (addr, stop) = start(&fx.config).await;
    let mut stream = connect(&connector(&fx.config), addr).await.unwrap();
    assert!(get(&mut stream, "/hello.txt").await.starts_with("HTTP/1.1 200 OK"));

    // Act
    stop.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert
    assert!(TcpStream::connect(addr).await.is_err());
}
