//! ## pqb-bench-cli
//! **Benchmark helper tools for pqb**
//!
//! - `commands`: rewrite a command script for the configured nodes
//! - `stats`: scrape benchmark logs into per cluster size reports
//! - `compose`: emit the compose manifest for a node list
//! - `replay`: play one node's commands into its pqb prompt
//!
//! Tool output goes to stdout, logs to stderr. Usage errors and failures exit
//! with status 1.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pqb_bench_config::BenchConfig;
use pqb_bench_telemetry::EventLogger;

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match BenchConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            EventLogger::init("info");
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    EventLogger::init(&config.telemetry.log_level);

    let stdout = std::io::stdout();
    match commands::run_command(cli, &config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
