use crate::conf::ConfigError;
use crate::conf::types::MediaserveConfig;
use crate::conf::validation::ValidatedConfig;
use crate::conf::validation::report::ValidationReport;
use crate::conf::validation::validator::{
    validate_bind, validate_headers, validate_limits, validate_server, validate_tls,
    validate_version,
};

/// Run every semantic check and aggregate the issues.
///
/// Warnings never fail validation; any error does.
pub fn validate_config(config: MediaserveConfig) -> Result<ValidatedConfig, ConfigError> {
    let mut report = ValidationReport::default();

    // Version validation fails fast, because it invalidates the entire config model.
    if validate_version(&config.server, &mut report) {
        validate_server(&config.server, &mut report);
        validate_bind(&config.bind, &mut report);
        validate_tls(&config.tls, &mut report);
        validate_headers(&config.headers, &mut report);
        validate_limits(&config.limits, &mut report);
    }

    if !report.errors.is_empty() {
        return Err(ConfigError::Validation { report });
    }

    Ok(ValidatedConfig {
        config,
        validation: report,
    })
}
