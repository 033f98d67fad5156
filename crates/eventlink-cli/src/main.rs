mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "eventlink",
    version,
    about = "Inspect topic-to-dispatch connector bindings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a connector file and report dispatch advisories
    Check {
        /// Path to connector YAML file
        connectors: PathBuf,
    },
    /// Print every connector descriptor in a file
    List {
        /// Path to connector YAML file
        connectors: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, cli.log_format)?;

    match cli.command {
        Commands::Check { connectors } => commands::check::execute(&connectors),
        Commands::List { connectors } => commands::list::execute(&connectors),
    }
}
