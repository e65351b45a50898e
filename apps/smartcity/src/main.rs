//! SmartCity control panel entry point.

use clap::Parser;
use smartcity::cli::{Cli, init_tracing, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "smartcity exited with an error");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
