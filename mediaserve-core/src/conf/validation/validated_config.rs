use crate::conf::types::MediaserveConfig;
use crate::conf::validation::report::ValidationReport;

/// A config that passed validation, along with any warnings it produced.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: MediaserveConfig,
    pub validation: ValidationReport,
}
