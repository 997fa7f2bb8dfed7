use crate::conf::types::MediaserveConfig;
use crate::conf::ValidatedConfig;
use crate::http::{ConnectionSettings, RequestHandler};
use crate::policy::HeaderPolicyEngine;
use crate::server::{ConnectionAcceptor, ServerError, shutdown_signal};
use crate::static_files::{PathResolver, StaticSite};
use crate::tls::{TlsContext, TlsContextBuilder};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Run the server with a validated configuration until SIGINT / SIGTERM.
///
/// TLS material, the header policy and the document root are all loaded
/// before the runtime starts, so a broken certificate never reaches `bind`.
pub fn run(validated: ValidatedConfig) -> Result<(), ServerError> {
    use tokio::runtime::Builder;

    let config = validated.config;
    let server = Server::from_config(&config)?;

    let mut builder = Builder::new_multi_thread();
    if let Some(threads) = config.server.threads {
        tracing::debug!(threads, "overriding Tokio worker threads");
        builder.worker_threads(threads);
    }
    let runtime = builder.enable_all().build().map_err(ServerError::Runtime)?;

    let result = runtime.block_on(async move {
        let bound = server.bind().await?;
        bound.serve(shutdown_signal()).await;
        Ok::<_, ServerError>(())
    });

    // In-flight workers are not drained.
    runtime.shutdown_background();
    result
}

/// A fully prepared server that has not bound its socket yet.
pub struct Server {
    addr: SocketAddr,
    tls: TlsContext,
    site: Arc<StaticSite>,
    settings: ConnectionSettings,
    handshake_timeout: Duration,
    max_connections: usize,
}

impl Server {
    pub fn from_config(config: &MediaserveConfig) -> Result<Self, ServerError> {
        let addr = config.bind.resolve()?;

        let tls = TlsContextBuilder::new(&config.tls).build()?;
        let policy = HeaderPolicyEngine::from_spec(&config.headers)?;
        let resolver =
            PathResolver::new(&config.server.root_dir).map_err(|source| ServerError::DocumentRoot {
                path: config.server.root_dir.clone(),
                source,
            })?;

        Ok(Self {
            addr,
            tls,
            site: Arc::new(StaticSite::new(resolver, policy)),
            settings: ConnectionSettings::from_config(&config.limits, &config.logging),
            handshake_timeout: Duration::from_secs(config.limits.handshake_timeout_seconds),
            max_connections: config.limits.max_connections,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn tls(&self) -> &TlsContext {
        &self.tls
    }

    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: self.addr,
            source,
        })?;

        tracing::info!(
            address = %local_addr,
            root = %self.site.root().display(),
            client_auth = ?self.tls.client_auth(),
            max_connections = self.max_connections,
            "listening"
        );

        let handler: Arc<dyn RequestHandler> = self.site;
        let acceptor = ConnectionAcceptor::new(
            self.tls.acceptor().clone(),
            handler,
            self.settings,
            self.handshake_timeout,
            self.max_connections,
        );

        Ok(BoundServer {
            listener,
            local_addr,
            acceptor,
        })
    }
}

/// A server holding its listening socket.
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    acceptor: ConnectionAcceptor,
}

impl BoundServer {
    /// Address actually bound, useful when the configured port was 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until `shutdown` resolves, then close the socket.
    pub async fn serve<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.acceptor.run(self.listener, shutdown).await;
    }
}
