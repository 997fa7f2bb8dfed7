use crate::conf::types::{
    BindSpec, HeadersSpec, LimitsSpec, LoggingSpec, Origin, ServerSpec, TlsSpec,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Represents the whole configuration file. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaserveConfig {
    pub server: ServerSpec,
    pub bind: BindSpec,
    pub tls: TlsSpec,
    pub headers: HeadersSpec,
    pub limits: LimitsSpec,
    pub logging: LoggingSpec,
}

impl MediaserveConfig {
    /// Stamp every block with the file it was read from.
    pub(crate) fn inject_origin(&mut self, path: &Path) {
        self.server.origin = Origin::new(path, "server");
        self.bind.origin = Origin::new(path, "bind");
        self.tls.origin = Origin::new(path, "tls");
        self.headers.origin = Origin::new(path, "headers");
        self.limits.origin = Origin::new(path, "limits");
        self.logging.origin = Origin::new(path, "logging");
    }
}
