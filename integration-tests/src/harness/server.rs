use crate::harness::config::patch_config;
use crate::harness::docroot::write_docroot;
use crate::harness::identity::{TestIdentity, write_identity};
use crate::harness::raw::{RawResponse, raw_exchange};
use crate::harness::{CapturedEvent, init_test_tracing};
use mediaserve_core::conf::{parse_config, validate_config};
use mediaserve_core::server::Server;
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::redirect::Policy;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, mpsc};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Handle to a running mediaserve test server.
///
/// The server runs on its own thread and runtime, bound to an ephemeral
/// loopback port. Dropping the handle stops the accept loop.
pub struct TestServer {
    addr: SocketAddr,
    base_url: String,
    client: Client,
    identity: TestIdentity,
    root: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
    _dir: TempDir,
}

impl TestServer {
    /// Start a server from an HCL fixture under `fixtures/config/`.
    ///
    /// Paths, certificates and ports are generated per instance, so tests can
    /// run in parallel.
    pub fn start(fixture: &str) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join("www");
        write_docroot(&root);
        let identity = write_identity(dir.path());

        let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("config")
            .join(format!("{fixture}.hcl"));

        assert!(
            fixture_path.exists(),
            "fixture config does not exist: {:?}",
            fixture_path
        );

        let mut cfg = parse_config(&fixture_path).expect("failed to parse fixture config");
        patch_config(&mut cfg, &root, &identity);
        let validated = validate_config(cfg).expect("fixture config failed validation");

        let server = Server::from_config(&validated.config).expect("failed to build server");

        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("failed to build test runtime");

            runtime.block_on(async move {
                let bound = server.bind().await.expect("failed to bind test server");
                addr_tx.send(bound.local_addr()).unwrap();
                bound
                    .serve(async move {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        let addr = addr_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("server failed to start");
        let base_url = format!("https://localhost:{}", addr.port());
        let client = client_builder(&identity, addr)
            .build()
            .expect("failed to build client");

        Self {
            addr,
            base_url,
            client,
            identity,
            root,
            shutdown: Some(shutdown_tx),
            _dir: dir,
        }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.client.head(self.url(path))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A client that reports redirects instead of following them.
    pub fn no_redirect_client(&self) -> Client {
        client_builder(&self.identity, self.addr)
            .redirect(Policy::none())
            .build()
            .expect("failed to build client")
    }

    /// A client presenting a certificate issued by the test client CA.
    pub fn client_with_identity(&self) -> Client {
        let identity = reqwest::Identity::from_pem(&self.identity.client.pem)
            .expect("invalid client identity");
        client_builder(&self.identity, self.addr)
            .identity(identity)
            .build()
            .expect("failed to build client")
    }

    /// Send raw request bytes over a fresh TLS connection and read until the server closes.
    pub fn raw(&self, request: &str) -> RawResponse {
        raw_exchange(self.addr, &self.identity.cert, request.as_bytes())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn client_builder(identity: &TestIdentity, addr: SocketAddr) -> ClientBuilder {
    let ca = reqwest::Certificate::from_pem(identity.cert_pem.as_bytes())
        .expect("invalid server certificate");

    Client::builder()
        .use_rustls_tls()
        .add_root_certificate(ca)
        .resolve("localhost", addr)
        .timeout(Duration::from_secs(5))
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Access events recorded so far by every server in this test binary.
pub fn access_events() -> Vec<CapturedEvent> {
    events()
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.target == "access")
        .cloned()
        .collect()
}
