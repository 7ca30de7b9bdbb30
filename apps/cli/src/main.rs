//! Foto Gear command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use fotogear_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_directive());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %err, code = ?err.code(), "Command failed");
            if !err.already_reported() {
                eprintln!("error: {err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
