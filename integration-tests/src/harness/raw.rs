use mediaserve_core::tls::load_certs;
use rustls::crypto::ring;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A response read off the wire, unparsed beyond the status line and headers.
#[derive(Debug)]
pub struct RawResponse {
    /// Everything the server sent, possibly several responses on keep-alive.
    pub text: String,
    pub status: u16,
    pub head: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// First value of a (lowercase) header in the first response.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    /// Number of status lines in the stream.
    pub fn response_count(&self) -> usize {
        self.text.matches("HTTP/1.1 ").count()
    }
}

pub(crate) fn raw_exchange(addr: SocketAddr, server_cert: &Path, request: &[u8]) -> RawResponse {
    let mut roots = RootCertStore::empty();
    for cert in load_certs(server_cert).expect("invalid server cert") {
        roots.add(cert).expect("failed to trust server cert");
    }

    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("no protocol versions")
        .with_root_certificates(roots)
        .with_no_client_auth();

    let name = ServerName::try_from("localhost").unwrap();
    let conn = ClientConnection::new(Arc::new(config), name).expect("failed to start TLS client");

    let sock = TcpStream::connect(addr).expect("failed to connect");
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut tls = StreamOwned::new(conn, sock);

    tls.write_all(request).expect("failed to write request");
    tls.flush().unwrap();

    let mut out = Vec::new();
    match tls.read_to_end(&mut out) {
        Ok(_) => {}
        // Servers may drop the socket without close_notify after an error response.
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {}
        Err(e) => panic!("failed to read response: {e}"),
    }

    parse(out)
}

fn parse(out: Vec<u8>) -> RawResponse {
    let split = out
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| i + 4)
        .unwrap_or(out.len());

    let head = String::from_utf8_lossy(&out[..split]).into_owned();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    RawResponse {
        text: String::from_utf8_lossy(&out).into_owned(),
        status,
        head,
        body: out[split..].to_vec(),
    }
}
