use crate::conf::types::LoggingSpec;
use crate::http::{Request, RequestId};
use http::{HeaderMap, StatusCode};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Which request headers end up in the access log.
#[derive(Debug, Clone, Default)]
pub struct HeaderLogging {
    include_headers: bool,
    /// Lowercase names.
    redact_headers: Vec<String>,
}

impl HeaderLogging {
    pub fn new(include_headers: bool, redact_headers: &[String]) -> Self {
        Self {
            include_headers,
            redact_headers: redact_headers.iter().map(|h| h.to_lowercase()).collect(),
        }
    }

    pub(crate) fn headers_json(&self, headers: &HeaderMap) -> Option<String> {
        if !self.include_headers {
            return None;
        }

        serde_json::to_string(&self.build_redacted_headers(headers)).ok()
    }

    fn build_redacted_headers(&self, headers: &HeaderMap) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();

        for (name, value) in headers.iter() {
            let name = name.as_str();

            let val = if self.redact_headers.iter().any(|r| r == name) {
                "<redacted>".to_string()
            } else {
                match value.to_str() {
                    Ok(v) => v.to_string(),
                    Err(_) => "<binary>".to_string(),
                }
            };

            out.insert(name.to_string(), val);
        }

        out
    }
}

impl From<&LoggingSpec> for HeaderLogging {
    fn from(spec: &LoggingSpec) -> Self {
        Self::new(spec.include_headers, &spec.redact_headers)
    }
}

/// One access log event per request, including heads rejected before parsing
/// and transfers cut short.
pub struct AccessLog<'a> {
    pub request_id: &'a RequestId,
    pub peer: SocketAddr,
    /// `None` when the head never parsed.
    pub request: Option<&'a Request>,
    pub status: StatusCode,
    /// Body bytes actually written.
    pub bytes: u64,
    pub duration: Duration,
    /// The body stopped short of its announced length.
    pub aborted: bool,
}

impl AccessLog<'_> {
    pub fn emit(&self, headers: &HeaderLogging) {
        let request_headers = self
            .request
            .and_then(|request| headers.headers_json(&request.headers));

        tracing::info!(
            target: "access",
            request_id = %self.request_id,
            peer = %self.peer,
            method = self.request.map(|r| r.method.as_str()),
            path = self.request.map(|r| r.path.as_str()),
            status = self.status.as_u16(),
            bytes = self.bytes,
            duration_ms = self.duration.as_secs_f64() * 1000.0,
            aborted = self.aborted,
            headers = request_headers.as_deref(),
        );
    }
}
