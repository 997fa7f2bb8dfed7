use crate::http::{ConnectionSettings, RequestHandler, serve_connection};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;
use tokio_rustls::TlsAcceptor;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Accepts TCP connections, runs the TLS handshake and hands every connection
/// to its own task.
///
/// A semaphore bounds the connections served at once. The permit is taken
/// before `accept`, so a saturated server leaves new sockets in the backlog.
pub struct ConnectionAcceptor {
    tls: TlsAcceptor,
    handler: Arc<dyn RequestHandler>,
    settings: Arc<ConnectionSettings>,
    handshake_timeout: Duration,
    connection_limit: Arc<Semaphore>,
}

impl ConnectionAcceptor {
    pub fn new(
        tls: TlsAcceptor,
        handler: Arc<dyn RequestHandler>,
        settings: ConnectionSettings,
        handshake_timeout: Duration,
        max_connections: usize,
    ) -> Self {
        Self {
            tls,
            handler,
            settings: Arc::new(settings),
            handshake_timeout,
            connection_limit: Arc::new(Semaphore::new(max_connections)),
        }
    }

    /// Connection slots currently free.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }

    /// Run the accept loop until `shutdown` resolves.
    ///
    /// The listener is dropped on return. Spawned workers keep running.
    pub async fn run<F>(&self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            // Acquire permit first (backpressure)
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = self.connection_limit.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (socket, peer) = tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                },
            };

            tracing::debug!(
                %peer,
                available_permits = self.connection_limit.available_permits(),
                "connection accepted"
            );

            self.spawn_worker(socket, peer, permit);
        }

        tracing::info!("accept loop stopped");
    }

    fn spawn_worker(&self, socket: TcpStream, peer: SocketAddr, permit: OwnedSemaphorePermit) {
        let tls = self.tls.clone();
        let handler = Arc::clone(&self.handler);
        let settings = Arc::clone(&self.settings);
        let handshake_timeout = self.handshake_timeout;

        tokio::spawn(async move {
            // Held for the lifetime of the connection.
            let _permit = permit;

            if let Err(e) = socket.set_nodelay(true) {
                tracing::debug!(%peer, error = %e, "failed to set TCP_NODELAY");
            }

            let stream = match timeout(handshake_timeout, tls.accept(socket)).await {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) => {
                    tracing::debug!(%peer, error = %e, "TLS handshake failed");
                    return;
                }
                Err(_) => {
                    tracing::debug!(%peer, "TLS handshake timed out");
                    return;
                }
            };

            if let Err(e) = serve_connection(stream, peer, handler.as_ref(), &settings).await {
                tracing::debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }
}
