use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Configuration schema version.
    pub version: u32,

    /// Document root. Everything served lives beneath this directory.
    pub root_dir: PathBuf,

    /// Optional number of Tokio worker threads - default is decided by Tokio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for ServerSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("server"),
            version: 1,
            root_dir: PathBuf::from("."),
            threads: None,
        }
    }
}
