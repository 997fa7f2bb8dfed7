mod error;
mod loader;
pub mod types;
pub mod validation;

pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config, parse_config, parse_config_str};
pub use types::MediaserveConfig;
pub use validation::{ValidatedConfig, ValidationReport, validate_config};
