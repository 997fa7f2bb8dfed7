mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Print issues without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,

        /// Print issues as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}
