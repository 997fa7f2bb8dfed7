use crate::harness::identity::TestIdentity;
use mediaserve_core::conf::types::MediaserveConfig;
use std::path::Path;

/// Point a fixture config at the temp document root, the generated identity
/// and an ephemeral loopback port.
pub fn patch_config(cfg: &mut MediaserveConfig, root: &Path, identity: &TestIdentity) {
    cfg.server.root_dir = root.to_path_buf();

    cfg.bind.interface = "loopback".to_string();
    cfg.bind.port = 0;

    cfg.tls.cert = identity.cert.clone();
    cfg.tls.key = identity.key.clone();
    if let Some(auth) = cfg.tls.client_auth.as_mut() {
        auth.ca_file = Some(identity.client_ca.clone());
    }
}
