use crate::conf::types::TlsSpec;
use crate::conf::validation::report::ValidationReport;
use crate::tls::{cipher_suite_by_name, suite_supports_version};

pub fn validate_tls(cfg: &TlsSpec, report: &mut ValidationReport) {
    if !cfg.cert.is_file() {
        report.missing_cert_file(&cfg.cert, &cfg.origin);
    }

    if !cfg.key.is_file() {
        report.missing_key_file(&cfg.key, &cfg.origin);
    }

    if cfg.min_version > cfg.max_version {
        report.invalid_tls_version_range(cfg.min_version, cfg.max_version, &cfg.origin);
    }

    validate_cipher_suites(cfg, report);

    if let Some(client_auth) = &cfg.client_auth {
        match &client_auth.ca_file {
            None => report.client_auth_missing_ca_file(&cfg.origin),
            Some(ca_file) if !ca_file.is_file() => {
                report.ca_file_does_not_exist(ca_file, &cfg.origin)
            }
            Some(_) => {}
        }

        if client_auth.required {
            report.client_auth_rejects_browsers(&cfg.origin);
        }
    }
}

fn validate_cipher_suites(cfg: &TlsSpec, report: &mut ValidationReport) {
    // Empty means the provider defaults.
    if cfg.cipher_suites.is_empty() {
        return;
    }

    let mut known = Vec::with_capacity(cfg.cipher_suites.len());
    for name in &cfg.cipher_suites {
        match cipher_suite_by_name(name) {
            Some(suite) => known.push(suite),
            None => report.unknown_cipher_suite(name, &cfg.origin),
        }
    }

    // Only meaningful once the names and the version range are themselves sane.
    if known.len() != cfg.cipher_suites.len() || cfg.min_version > cfg.max_version {
        return;
    }

    let usable = known.iter().any(|suite| {
        [cfg.min_version, cfg.max_version]
            .into_iter()
            .any(|v| suite_supports_version(suite, v))
    });

    if !usable {
        report.no_cipher_suite_for_versions(&cfg.origin);
    }
}
