#![deny(rust_2018_idioms)]

use clap::{Parser, Subcommand};
use fare_estimator::{Result, Settings, error::error::ConfigSnafu, startup::App};
use snafu::ResultExt;
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(version, about = "Fare estimation for large sets of rides")]
struct Cli {
    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the fare of every ride in a dataset
    Calculate {
        /// Path to the dataset file
        #[arg(short = 'i', long)]
        dataset_file: PathBuf,
        /// Path to the output file, replaced if it exists
        #[arg(short, long)]
        output_file: PathBuf,
        /// Path to the YAML config file
        #[arg(short, long)]
        config_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", snafu::Report::from_error(e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Calculate {
            dataset_file,
            output_file,
            config_file,
        } => {
            let settings = Settings::new(&config_file).context(ConfigSnafu)?;

            let level = if cli.verbose {
                tracing::Level::DEBUG
            } else {
                settings.log_level.into()
            };

            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();

            App::build(&settings)
                .run(dataset_file, output_file)
                .await
                .map(|_| ())
        }
    }
}
