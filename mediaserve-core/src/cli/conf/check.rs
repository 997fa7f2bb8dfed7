use crate::conf::types::CorsMode;
use crate::conf::{ConfigError, ValidatedConfig, ValidationReport, load_config};
use crate::tls::TlsContextBuilder;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool, json: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            for line in summary(&cfg) {
                println!("{line}");
            }
            if cfg.validation.has_violations() {
                print_report(&cfg.validation, plain, json)?;
            }
            Ok(())
        }
        Err(ConfigError::Validation { report }) => {
            print_report(&report, plain, json)?;
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Human readable digest of a config that passed validation.
pub fn summary(cfg: &ValidatedConfig) -> Vec<String> {
    let config = &cfg.config;
    let client_auth = match &config.tls.client_auth {
        None => "off",
        Some(auth) if auth.required => "required",
        Some(_) => "optional",
    };
    let cors = match config.headers.cors.mode {
        CorsMode::Wildcard => "wildcard",
        CorsMode::Fixed => "fixed",
        CorsMode::Reflect => "reflect",
    };

    let mut lines = vec![
        "✔ Config loaded successfully".to_string(),
        format!("✔ root {}", config.server.root_dir.display()),
        format!("✔ bind {}:{}", config.bind.interface, config.bind.port),
        format!(
            "✔ {} - {}, {} cipher suites configured",
            config.tls.min_version,
            config.tls.max_version,
            config.tls.cipher_suites.len()
        ),
        format!("✔ client auth {client_auth}"),
        format!("✔ cors {cors}"),
    ];

    if let Err(e) = TlsContextBuilder::new(&config.tls).build() {
        lines.push(format!("✘ TLS context: {e}"));
    }

    if !cfg.validation.warnings.is_empty() {
        lines.push(format!("⚠ {} warnings", cfg.validation.warnings.len()));
    }

    lines
}

fn print_report(report: &ValidationReport, plain: bool, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.render_json()?);
    } else if plain {
        report.render_plain();
    } else {
        report.render_pretty();
    }
    Ok(())
}
