use crate::conf::types::LimitsSpec;
use crate::conf::validation::report::ValidationReport;

pub fn validate_limits(cfg: &LimitsSpec, report: &mut ValidationReport) {
    let checks = [
        ("max_connections", cfg.max_connections == 0),
        ("handshake_timeout_seconds", cfg.handshake_timeout_seconds == 0),
        ("request_timeout_seconds", cfg.request_timeout_seconds == 0),
        ("keep_alive_timeout_seconds", cfg.keep_alive_timeout_seconds == 0),
        ("max_header_bytes", cfg.max_header_bytes == 0),
    ];

    for (field, is_zero) in checks {
        if is_zero {
            report.limit_must_be_positive(field, &cfg.origin);
        }
    }
}
