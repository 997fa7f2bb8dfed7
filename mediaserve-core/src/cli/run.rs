use crate::conf::types::{ClientAuthSpec, MediaserveConfig};
use crate::conf::{ConfigError, DEFAULT_CONFIG_PATH, parse_config, validate_config};
use crate::server;
use clap::Args;
use std::path::{Path, PathBuf};

/// Flags accepted by `mediaserve run`. Every flag overrides the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Path to the config file. Defaults are used when omitted and
    /// `config/mediaserve.hcl` does not exist.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Document root
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Certificate chain (PEM)
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// Private key (PEM)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// CA bundle for client certificate verification; enables client auth
    #[arg(long)]
    pub ca_file: Option<PathBuf>,

    /// Refuse clients that do not present a certificate
    #[arg(long, requires = "ca_file")]
    pub require_client_cert: bool,

    /// `all`, `loopback` or an IP address
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

impl RunArgs {
    /// Config file (explicit, default path or built-in defaults) with flags applied.
    pub fn resolve_config(&self) -> Result<MediaserveConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => parse_config(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                parse_config(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                tracing::info!(
                    path = DEFAULT_CONFIG_PATH,
                    "no config file found, using defaults"
                );
                MediaserveConfig::default()
            }
        };

        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut MediaserveConfig) {
        if let Some(root) = &self.root {
            config.server.root_dir = root.clone();
        }
        if let Some(cert) = &self.cert {
            config.tls.cert = cert.clone();
        }
        if let Some(key) = &self.key {
            config.tls.key = key.clone();
        }
        if let Some(ca_file) = &self.ca_file {
            let auth = config.tls.client_auth.get_or_insert_with(ClientAuthSpec::default);
            auth.ca_file = Some(ca_file.clone());
        }
        if self.require_client_cert
            && let Some(auth) = config.tls.client_auth.as_mut()
        {
            auth.required = true;
        }
        if let Some(bind) = &self.bind {
            config.bind.interface = bind.clone();
        }
        if let Some(port) = self.port {
            config.bind.port = port;
        }
    }
}

/// Load, validate and serve. Validation errors print the report and exit 1.
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let validated = match validate_config(config) {
        Ok(validated) => validated,
        Err(ConfigError::Validation { report }) => {
            report.render_pretty();
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    for warning in &validated.validation.warnings {
        tracing::warn!(origin = %warning.origin, "{}", warning.message);
    }

    server::run(validated)?;
    Ok(())
}
