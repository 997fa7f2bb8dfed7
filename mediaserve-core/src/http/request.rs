use http::header::{CONNECTION, CONTENT_LENGTH, HOST, ORIGIN, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Version};
use std::net::SocketAddr;
use thiserror::Error;

/// Upper bound on header lines in one request head.
pub const MAX_HEADERS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("malformed request head: {0}")]
    Malformed(String),

    #[error("too many request headers")]
    TooManyHeaders,
}

/// One parsed request head. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,

    /// Request target exactly as received.
    pub target: String,

    /// Target with query and fragment removed, still percent-encoded.
    pub path: String,

    pub query: Option<String>,
    pub version: Version,
    pub headers: HeaderMap,
    pub peer: SocketAddr,
}

impl Request {
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn origin(&self) -> Option<&str> {
        self.header(&ORIGIN)
    }

    pub fn host(&self) -> Option<&str> {
        self.header(&HOST).filter(|h| !h.is_empty())
    }

    /// HTTP/1.1 persists unless told otherwise; HTTP/1.0 only when asked to.
    pub fn wants_keep_alive(&self) -> bool {
        let connection = self.header(&CONNECTION).unwrap_or_default();
        let has_token = |token: &str| {
            connection
                .split(',')
                .any(|t| t.trim().eq_ignore_ascii_case(token))
        };

        match self.version {
            Version::HTTP_10 => has_token("keep-alive"),
            _ => !has_token("close"),
        }
    }

    /// Whether the client announced a body. Bodies are never read.
    pub fn has_body(&self) -> bool {
        if self.headers.contains_key(TRANSFER_ENCODING) {
            return true;
        }

        self.header(&CONTENT_LENGTH)
            .map(|v| v.trim().parse::<u64>().map(|n| n > 0).unwrap_or(true))
            .unwrap_or(false)
    }
}

/// Parse a request head from the front of `buf`.
///
/// Returns `Ok(None)` while the head is still incomplete, otherwise the request
/// and the number of bytes it occupied.
pub fn parse_request_head(
    buf: &[u8],
    peer: SocketAddr,
) -> Result<Option<(Request, usize)>, RequestError> {
    let mut storage = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut parsed = httparse::Request::new(&mut storage);

    let consumed = match parsed.parse(buf) {
        Ok(httparse::Status::Complete(n)) => n,
        Ok(httparse::Status::Partial) => return Ok(None),
        Err(httparse::Error::TooManyHeaders) => return Err(RequestError::TooManyHeaders),
        Err(e) => return Err(RequestError::Malformed(e.to_string())),
    };

    let method = parsed
        .method
        .ok_or_else(|| RequestError::Malformed("missing method".into()))
        .and_then(|m| {
            Method::from_bytes(m.as_bytes())
                .map_err(|_| RequestError::Malformed(format!("invalid method {m:?}")))
        })?;

    let target = parsed
        .path
        .ok_or_else(|| RequestError::Malformed("missing request target".into()))?
        .to_string();

    let version = match parsed.version {
        Some(0) => Version::HTTP_10,
        Some(1) => Version::HTTP_11,
        other => {
            return Err(RequestError::Malformed(format!(
                "unsupported HTTP version {other:?}"
            )));
        }
    };

    let mut headers = HeaderMap::with_capacity(parsed.headers.len());
    for header in parsed.headers.iter() {
        let name = HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|_| RequestError::Malformed(format!("invalid header name {:?}", header.name)))?;
        let value = HeaderValue::from_bytes(header.value)
            .map_err(|_| RequestError::Malformed(format!("invalid value for {name}")))?;
        headers.append(name, value);
    }

    let (path, query, authority) = split_target(&target);

    // An absolute-form target's authority replaces Host.
    if let Some(authority) = authority {
        let value = HeaderValue::from_str(authority)
            .map_err(|_| RequestError::Malformed(format!("invalid authority {authority:?}")))?;
        headers.insert(HOST, value);
    }

    Ok(Some((
        Request {
            method,
            path,
            query,
            target,
            version,
            headers,
            peer,
        },
        consumed,
    )))
}

/// Split a target into path, query and, for absolute-form targets, the authority.
fn split_target(target: &str) -> (String, Option<String>, Option<&str>) {
    let without_fragment = target.split('#').next().unwrap_or_default();

    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (without_fragment, None),
    };

    if let Some((scheme, rest)) = path.split_once("://")
        && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
    {
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        let authority = (!authority.is_empty()).then_some(authority);
        return (path.to_string(), query, authority);
    }

    (path.to_string(), query, None)
}
