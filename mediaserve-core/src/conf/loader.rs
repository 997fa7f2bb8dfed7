use crate::conf::types::MediaserveConfig;
use crate::conf::validation::{ValidatedConfig, validate_config};
use crate::conf::ConfigError;

use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/mediaserve.hcl";

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    let config = parse_config(path)?;
    validate_config(config)
}

/// Read and parse a config file without semantic validation.
///
/// Callers that layer CLI overrides on top of the file validate afterwards.
pub fn parse_config(path: &Path) -> Result<MediaserveConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let mut config = parse_config_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Inject origin metadata
    //--------------------------------------------------------------------------
    config.inject_origin(path);

    Ok(config)
}

pub fn parse_config_str(contents: &str) -> Result<MediaserveConfig, hcl::Error> {
    hcl::from_str(contents)
}
