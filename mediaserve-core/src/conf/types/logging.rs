use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSpec {
    #[serde(skip)]
    pub origin: Origin,

    // Request headers are excluded from access logs by default.
    pub include_headers: bool,

    pub redact_headers: Vec<String>,
}

impl Default for LoggingSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("logging"),
            include_headers: false,
            redact_headers: vec!["authorization".to_string(), "cookie".to_string()],
        }
    }
}
