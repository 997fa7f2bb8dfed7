use clap::{Parser, Subcommand};
use mediaserve_core::cli::conf::{ConfigCmd, check, dump};
use mediaserve_core::cli::{RunArgs, run};
use mediaserve_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "mediaserve",
    version,
    about = "Mediaserve: TLS static media server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Config tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Serve the document root (default)
    Run(RunArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Config { cmd }) => match cmd {
            ConfigCmd::Check { path, plain, json } => check(path, plain, json),
            ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
        },

        Some(Command::Run(args)) => {
            init_logging();
            run(args)
        }

        None => {
            init_logging();
            run(RunArgs::default())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "mediaserve failed");
        eprintln!("mediaserve: {e:#}");
        std::process::exit(1);
    }
}
