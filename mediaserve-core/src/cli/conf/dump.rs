use crate::conf::types::MediaserveConfig;
use crate::conf::load_config;
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: PathBuf, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;
    println!("{}", render(&cfg.config, json, yaml)?);
    Ok(())
}

/// JSON unless YAML was asked for.
pub fn render(config: &MediaserveConfig, json: bool, yaml: bool) -> anyhow::Result<String> {
    if yaml && !json {
        dump_yaml(config)
    } else {
        dump_json(config)
    }
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
