use crate::conf::types::{BindInterface, BindSpec};
use crate::conf::validation::report::ValidationReport;
use std::str::FromStr;

pub fn validate_bind(cfg: &BindSpec, report: &mut ValidationReport) {
    if BindInterface::from_str(&cfg.interface).is_err() {
        report.invalid_bind_interface(&cfg.interface, &cfg.origin);
    }

    // Port 0 asks the OS for an ephemeral port and is allowed.
    if cfg.port != 0 && cfg.port < 1024 {
        report.privileged_port(cfg.port, &cfg.origin);
    }
}
