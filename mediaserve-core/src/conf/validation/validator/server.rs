use crate::conf::types::ServerSpec;
use crate::conf::validation::report::ValidationReport;

/// Validate top-level config version.
///
/// Fail-fast: invalid versions invalidate the entire config model.
pub fn validate_version(server: &ServerSpec, report: &mut ValidationReport) -> bool {
    if server.version != 1 {
        report.invalid_config_version(&server.version, &server.origin);
        return false;
    }
    true
}

pub fn validate_server(cfg: &ServerSpec, report: &mut ValidationReport) {
    if !cfg.root_dir.exists() {
        report.root_dir_does_not_exist(&cfg.root_dir, &cfg.origin);
    } else if !cfg.root_dir.is_dir() {
        report.root_dir_not_a_dir(&cfg.root_dir, &cfg.origin);
    }

    if let Some(t) = cfg.threads
        && (t == 0 || t > 1024)
    {
        report.invalid_threads(t, &cfg.origin);
    }
}
