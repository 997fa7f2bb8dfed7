use bytes::Bytes;
use http::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Extensions, HeaderMap, HeaderValue, StatusCode, Version};
use std::fmt::Write;
use tokio::fs;

/// Value of the `Allow` header on 405 responses.
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

pub enum Body {
    Empty,
    /// Rendered in memory (listings, error pages).
    Bytes(Bytes),
    /// Streamed from disk in fixed-size chunks.
    File { file: fs::File, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Bytes(bytes) => write!(f, "Bytes({})", bytes.len()),
            Body::File { len, .. } => write!(f, "File({len})"),
        }
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,

    /// Typed values handed from `on_request` to `on_headers_ready`. Never written.
    pub extensions: Extensions,
}

impl Response {
    /// Response without a body and with `Content-Length: 0`.
    pub fn empty(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));

        Self {
            status,
            headers,
            body: Body::Empty,
            extensions: Extensions::new(),
        }
    }

    /// Generic plain text response. The text must not carry internal error details.
    pub fn text(status: StatusCode, text: &'static str) -> Self {
        Self::bytes(
            status,
            HeaderValue::from_static("text/plain; charset=utf-8"),
            Bytes::from_static(text.as_bytes()),
        )
    }

    pub fn bytes(status: StatusCode, content_type: HeaderValue, body: Bytes) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));

        Self {
            status,
            headers,
            body: Body::Bytes(body),
            extensions: Extensions::new(),
        }
    }

    /// Canonical error response for a status code.
    pub fn error(status: StatusCode) -> Self {
        let text = match status {
            StatusCode::BAD_REQUEST => "Bad Request\n",
            StatusCode::FORBIDDEN => "Forbidden\n",
            StatusCode::NOT_FOUND => "Not Found\n",
            StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed\n",
            StatusCode::REQUEST_TIMEOUT => "Request Timeout\n",
            StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE => "Request Header Fields Too Large\n",
            _ => "Internal Server Error\n",
        };

        let mut response = Self::text(status, text);
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }

    /// Serialize the status line and headers, terminated by the blank line.
    pub fn encode_head(&self, version: Version) -> Vec<u8> {
        let version = match version {
            Version::HTTP_10 => "HTTP/1.0",
            _ => "HTTP/1.1",
        };

        let mut head = String::with_capacity(256);
        let _ = write!(
            head,
            "{} {} {}\r\n",
            version,
            self.status.as_str(),
            self.status.canonical_reason().unwrap_or("")
        );

        let mut out = head.into_bytes();
        for (name, value) in self.headers.iter() {
            out.extend_from_slice(name.as_str().as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out
    }
}
