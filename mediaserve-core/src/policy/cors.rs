use crate::conf::types::{CorsMode, CorsSpec};
use crate::policy::PolicyError;
use http::HeaderValue;

/// How `Access-Control-Allow-Origin` is chosen. Selected once at startup.
#[derive(Debug, Clone)]
pub enum CorsPolicy {
    /// `*` for every origin.
    Wildcard,
    /// One configured origin, whatever the request sent.
    Fixed(HeaderValue),
    /// Echo the request origin. A non-empty list restricts which origins are echoed.
    Reflect { allowed: Vec<String> },
}

impl CorsPolicy {
    pub fn from_spec(spec: &CorsSpec) -> Result<Self, PolicyError> {
        match spec.mode {
            CorsMode::Wildcard => Ok(CorsPolicy::Wildcard),
            CorsMode::Fixed => {
                let origin = spec
                    .origin
                    .as_deref()
                    .ok_or(PolicyError::MissingFixedOrigin)?;
                let value = HeaderValue::from_str(origin)
                    .map_err(|_| PolicyError::invalid("cors.origin", origin))?;
                Ok(CorsPolicy::Fixed(value))
            }
            CorsMode::Reflect => Ok(CorsPolicy::Reflect {
                allowed: spec.allowed_origins.clone(),
            }),
        }
    }

    /// `Access-Control-Allow-Origin` for a request origin, if it is allowed at all.
    pub fn allow_origin(&self, origin: &str) -> Option<HeaderValue> {
        match self {
            CorsPolicy::Wildcard => Some(HeaderValue::from_static("*")),
            CorsPolicy::Fixed(value) => Some(value.clone()),
            CorsPolicy::Reflect { allowed } => {
                if !allowed.is_empty() && !allowed.iter().any(|a| a.eq_ignore_ascii_case(origin)) {
                    return None;
                }
                HeaderValue::from_str(origin).ok()
            }
        }
    }

    /// Reflected values differ per origin, so caches must key on it.
    pub fn varies_by_origin(&self) -> bool {
        matches!(self, CorsPolicy::Reflect { .. })
    }
}
