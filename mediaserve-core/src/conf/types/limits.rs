use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Connections served concurrently. The accept loop waits once reached.
    pub max_connections: usize,

    pub handshake_timeout_seconds: u64,

    /// Upper bound for receiving one complete request head.
    pub request_timeout_seconds: u64,

    /// Idle time allowed between requests on a persistent connection.
    pub keep_alive_timeout_seconds: u64,

    pub max_header_bytes: usize,
}

impl Default for LimitsSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("limits"),
            max_connections: 1024,
            handshake_timeout_seconds: 10,
            request_timeout_seconds: 30,
            keep_alive_timeout_seconds: 15,
            max_header_bytes: 16 * 1024,
        }
    }
}
