use crate::conf::types::{LimitsSpec, LoggingSpec};
use crate::http::{
    AccessLog, Body, ConnectionError, HeaderLogging, Request, RequestError, RequestHandler,
    RequestId, Response, parse_request_head,
};
use crate::static_files::stream_file;
use bytes::{Buf, BytesMut};
use http::header::{CONNECTION, DATE};
use http::{HeaderValue, Method, StatusCode, Version};
use httpdate::fmt_http_date;
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};

const READ_CHUNK: usize = 4 * 1024;

/// Per-connection limits, shared by every worker.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Bound on receiving one request head once its first byte arrived.
    pub request_timeout: Duration,
    /// Idle bound between requests on a persistent connection.
    pub keep_alive_timeout: Duration,
    pub max_header_bytes: usize,
    pub header_logging: HeaderLogging,
}

impl ConnectionSettings {
    pub fn from_config(limits: &LimitsSpec, logging: &LoggingSpec) -> Self {
        Self {
            request_timeout: Duration::from_secs(limits.request_timeout_seconds),
            keep_alive_timeout: Duration::from_secs(limits.keep_alive_timeout_seconds),
            max_header_bytes: limits.max_header_bytes,
            header_logging: HeaderLogging::from(logging),
        }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from_config(&LimitsSpec::default(), &LoggingSpec::default())
    }
}

enum ReadHead {
    Request(Request, usize),
    /// Peer went away or stayed idle past the allowed wait.
    Closed,
    /// Answer with this status, then close.
    Reject(StatusCode),
}

/// Drive one connection: read request heads sequentially, answer each, honor keep-alive.
///
/// Per-request failures become responses. Only transport failures and aborted
/// file streams end the connection with an error.
pub async fn serve_connection<S, H>(
    mut stream: S,
    peer: SocketAddr,
    handler: &H,
    settings: &ConnectionSettings,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: RequestHandler + ?Sized,
{
    let mut buf = BytesMut::with_capacity(READ_CHUNK * 2);
    let mut first = true;

    loop {
        let waited = std::time::Instant::now();
        let (request, consumed) = match read_head(&mut stream, &mut buf, peer, settings, first).await? {
            ReadHead::Request(request, consumed) => (request, consumed),
            ReadHead::Closed => break,
            ReadHead::Reject(status) => {
                tracing::debug!(%peer, status = status.as_u16(), "rejecting request head");
                let bytes = write_rejection(&mut stream, status, handler).await?;

                AccessLog {
                    request_id: &RequestId::default(),
                    peer,
                    request: None,
                    status,
                    bytes,
                    duration: waited.elapsed(),
                    aborted: false,
                }
                .emit(&settings.header_logging);
                break;
            }
        };

        first = false;
        buf.advance(consumed);

        if !respond(&mut stream, &request, handler, settings).await? {
            break;
        }
    }

    // Best effort close_notify; the peer may already be gone.
    let _ = stream.shutdown().await;
    Ok(())
}

async fn read_head<S>(
    stream: &mut S,
    buf: &mut BytesMut,
    peer: SocketAddr,
    settings: &ConnectionSettings,
    first: bool,
) -> Result<ReadHead, ConnectionError>
where
    S: AsyncRead + Unpin,
{
    // The head deadline starts with the first byte, or immediately for the first request.
    let mut deadline = (first || !buf.is_empty()).then(|| Instant::now() + settings.request_timeout);

    loop {
        if !buf.is_empty() {
            match parse_request_head(&buf[..], peer) {
                Ok(Some((_, consumed))) if consumed > settings.max_header_bytes => {
                    return Ok(ReadHead::Reject(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE));
                }
                Ok(Some((request, consumed))) => return Ok(ReadHead::Request(request, consumed)),
                Ok(None) if buf.len() > settings.max_header_bytes => {
                    return Ok(ReadHead::Reject(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE));
                }
                Ok(None) => {}
                Err(RequestError::TooManyHeaders) => {
                    return Ok(ReadHead::Reject(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE));
                }
                Err(e) => {
                    tracing::debug!(%peer, error = %e, "malformed request head");
                    return Ok(ReadHead::Reject(StatusCode::BAD_REQUEST));
                }
            }
        }

        let wait_until = deadline.unwrap_or_else(|| Instant::now() + settings.keep_alive_timeout);

        buf.reserve(READ_CHUNK);
        match timeout_at(wait_until, stream.read_buf(buf)).await {
            Err(_) if buf.is_empty() => return Ok(ReadHead::Closed),
            Err(_) => return Ok(ReadHead::Reject(StatusCode::REQUEST_TIMEOUT)),
            Ok(Ok(0)) => return Ok(ReadHead::Closed),
            Ok(Ok(_)) => {
                if deadline.is_none() {
                    deadline = Some(Instant::now() + settings.request_timeout);
                }
            }
            Ok(Err(e)) => return Err(e.into()),
        }
    }
}

/// Answer one parsed request. Returns whether the connection stays open.
async fn respond<S, H>(
    stream: &mut S,
    request: &Request,
    handler: &H,
    settings: &ConnectionSettings,
) -> Result<bool, ConnectionError>
where
    S: AsyncWrite + Unpin,
    H: RequestHandler + ?Sized,
{
    let started = std::time::Instant::now();
    let request_id = RequestId::default();

    // Bodies are never read, so the rest of the stream cannot be trusted as a new head.
    let keep_alive = request.wants_keep_alive() && !request.has_body();

    let mut response = match request.method {
        Method::GET | Method::HEAD => handler.on_request(request).await,
        Method::OPTIONS => Response::empty(StatusCode::OK),
        _ => Response::error(StatusCode::METHOD_NOT_ALLOWED),
    };

    handler.on_headers_ready(request, &mut response);
    finish_headers(&mut response, keep_alive);

    stream
        .write_all(&response.encode_head(request.version))
        .await?;

    let status = response.status;
    let written = if request.method == Method::HEAD {
        0
    } else {
        match response.body {
            Body::Empty => 0,
            Body::Bytes(bytes) => {
                stream.write_all(&bytes).await?;
                bytes.len() as u64
            }
            Body::File { file, len } => match stream_file(file, len, stream).await {
                Ok(written) => written,
                Err(e) => {
                    tracing::warn!(
                        request_id = %request_id,
                        peer = %request.peer,
                        path = %request.path,
                        error = %e,
                        "aborting connection mid-transfer"
                    );

                    AccessLog {
                        request_id: &request_id,
                        peer: request.peer,
                        request: Some(request),
                        status,
                        bytes: e.bytes_written(),
                        duration: started.elapsed(),
                        aborted: true,
                    }
                    .emit(&settings.header_logging);
                    return Err(e.into());
                }
            },
        }
    };

    stream.flush().await?;

    AccessLog {
        request_id: &request_id,
        peer: request.peer,
        request: Some(request),
        status,
        bytes: written,
        duration: started.elapsed(),
        aborted: false,
    }
    .emit(&settings.header_logging);

    Ok(keep_alive)
}

fn finish_headers(response: &mut Response, keep_alive: bool) {
    if let Ok(date) = HeaderValue::from_str(&fmt_http_date(SystemTime::now())) {
        response.headers.insert(DATE, date);
    }

    if !keep_alive {
        response
            .headers
            .insert(CONNECTION, HeaderValue::from_static("close"));
    }
}

/// Write a closing error response for a head that never parsed. Returns the body length.
async fn write_rejection<S, H>(
    stream: &mut S,
    status: StatusCode,
    handler: &H,
) -> Result<u64, ConnectionError>
where
    S: AsyncWrite + Unpin,
    H: RequestHandler + ?Sized,
{
    let mut response = Response::error(status);
    handler.on_rejection(&mut response);
    finish_headers(&mut response, false);

    stream
        .write_all(&response.encode_head(Version::HTTP_11))
        .await?;

    let mut written = 0;
    if let Body::Bytes(bytes) = &response.body {
        stream.write_all(bytes).await?;
        written = bytes.len() as u64;
    }
    stream.flush().await?;
    Ok(written)
}
