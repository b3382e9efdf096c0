use std::{io, process::ExitCode};

use clap::Parser;
use frak_scripts::cli::Cli;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with 1 like every other failure; `--help` and `--version` exit with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    match cli.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Deployment failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
