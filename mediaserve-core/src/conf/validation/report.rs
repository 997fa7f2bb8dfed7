use crate::conf::types::{Origin, TlsVersion};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub(crate) fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        let json = ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        };

        serde_json::to_string_pretty(&json)
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            eprintln!(
                "{}:{}: {}",
                issue.origin.file.display(),
                severity,
                issue.message
            );

            if let Some(help) = &issue.help {
                eprintln!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 {
            eprintln!(
                "configuration validation failed ({} errors, {} warnings)\n",
                errors, warnings
            );
        }

        let mut by_file = std::collections::BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(&issue.origin.file)
                .or_insert(Vec::new())
                .push(issue);
        }

        for (file, issues) in by_file {
            eprintln!("{}", file.display());

            for issue in issues {
                match issue.severity {
                    Severity::Error => {
                        eprintln!(
                            "  {}: [{}] {}",
                            "error".red().bold(),
                            issue.origin.section,
                            issue.message
                        );
                    }
                    Severity::Warning => {
                        eprintln!(
                            "  {}: [{}] {}",
                            "warning".yellow().bold(),
                            issue.origin.section,
                            issue.message
                        );
                    }
                }

                if let Some(help) = &issue.help {
                    eprintln!("    {}: {}", "help".cyan(), help);
                }

                eprintln!();
            }
        }
    }
}

/// Server Spec Validation
impl ValidationReport {
    pub fn invalid_config_version(&mut self, version: &u32, origin: &Origin) {
        self.error(format!("invalid config version: {}", version), origin, None)
    }

    pub fn root_dir_does_not_exist(&mut self, dir: &Path, origin: &Origin) {
        self.error(
            format!("root dir does not exist: {}", dir.display()),
            origin,
            None,
        )
    }

    pub fn root_dir_not_a_dir(&mut self, dir: &Path, origin: &Origin) {
        self.error(
            format!("root dir is not a directory: {}", dir.display()),
            origin,
            None,
        )
    }

    pub fn invalid_threads(&mut self, threads: usize, origin: &Origin) {
        self.error(
            format!("invalid threads - must be between 1 and 1024: {}", threads),
            origin,
            None,
        )
    }
}

/// Bind Spec Validation
impl ValidationReport {
    pub fn invalid_bind_interface(&mut self, interface: &str, origin: &Origin) {
        self.error(
            format!("invalid bind interface: {}", interface),
            origin,
            Some("Use \"all\", \"loopback\" or a literal IP address.".to_string()),
        );
    }

    pub fn privileged_port(&mut self, port: u16, origin: &Origin) {
        self.warning(
            format!("port {} is privileged and usually requires root", port),
            origin,
            None,
        );
    }
}

/// TLS Spec Validation
impl ValidationReport {
    pub fn missing_cert_file(&mut self, cert_file: &Path, origin: &Origin) {
        self.error(
            format!("missing cert file: {}", cert_file.display()),
            origin,
            None,
        );
    }

    pub fn missing_key_file(&mut self, key_file: &Path, origin: &Origin) {
        self.error(
            format!("missing key file: {}", key_file.display()),
            origin,
            None,
        );
    }

    pub fn invalid_tls_version_range(
        &mut self,
        min: TlsVersion,
        max: TlsVersion,
        origin: &Origin,
    ) {
        self.error(
            format!("invalid TLS version range: min {} > max {}", min, max),
            origin,
            None,
        );
    }

    pub fn unknown_cipher_suite(&mut self, name: &str, origin: &Origin) {
        self.error(
            format!("unknown cipher suite: {}", name),
            origin,
            Some("Use IANA names such as TLS13_AES_128_GCM_SHA256.".to_string()),
        );
    }

    pub fn no_cipher_suite_for_versions(&mut self, origin: &Origin) {
        self.error(
            "no configured cipher suite is usable with the configured TLS versions".to_string(),
            origin,
            None,
        );
    }

    pub fn client_auth_missing_ca_file(&mut self, origin: &Origin) {
        self.error(
            "client_auth requires a ca_file".to_string(),
            origin,
            Some("Set tls.client_auth.ca_file or remove the client_auth block.".to_string()),
        );
    }

    pub fn ca_file_does_not_exist(&mut self, ca_file: &Path, origin: &Origin) {
        self.error(
            format!("CA file does not exist: {}", ca_file.display()),
            origin,
            None,
        );
    }

    pub fn client_auth_rejects_browsers(&mut self, origin: &Origin) {
        self.warning(
            "client certificates are required; browsers without one will fail the handshake"
                .to_string(),
            origin,
            Some("Set client_auth.required = false to verify certificates only when offered.".to_string()),
        );
    }
}

/// Header Spec Validation
impl ValidationReport {
    pub fn fixed_cors_without_origin(&mut self, origin: &Origin) {
        self.error(
            "cors mode \"fixed\" requires an origin".to_string(),
            origin,
            Some("Example: cors { mode = \"fixed\" origin = \"https://example.com\" }".to_string()),
        );
    }

    pub fn invalid_header_value(&mut self, field: &str, value: &str, origin: &Origin) {
        self.error(
            format!("invalid header value for {}: {:?}", field, value),
            origin,
            None,
        );
    }

    pub fn cacheable_markup(&mut self, value: &str, origin: &Origin) {
        self.error(
            format!("cache.markup must not allow caching: {:?}", value),
            origin,
            Some("HTML and directory listings are always revalidated. Include no-cache or no-store.".to_string()),
        );
    }

    pub fn cors_origin_ignored(&mut self, origin: &Origin) {
        self.warning(
            "cors origin is only used by mode \"fixed\"".to_string(),
            origin,
            None,
        );
    }
}

/// Limits Spec Validation
impl ValidationReport {
    pub fn limit_must_be_positive(&mut self, field: &str, origin: &Origin) {
        self.error(format!("{} must be greater than zero", field), origin, None);
    }
}
