//! Autoapprove CLI - approve pull requests that match a policy.
//!
//! `autoapprove run` is the GitHub Action entry point: it reads the workflow
//! event, evaluates the pull request and submits an approving review when the
//! policy allows it. `autoapprove check` evaluates recorded data offline.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};

use autoapprove_telemetry::{LogConfig, LogFormat};

mod commands;

use commands::{check, run};

/// Autoapprove - approve pull requests that match a policy
#[derive(Parser)]
#[command(name = "autoapprove")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: pretty, compact, json or full
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the pull request of the current workflow run and approve it
    Run(run::RunArgs),

    /// Evaluate a recorded pull request without contacting GitHub
    Check(check::CheckArgs),
}

/// Logging for the CLI. Logs go to stderr; stdout carries the decision.
fn log_config(verbose: bool, format: LogFormat) -> LogConfig {
    let level = if verbose { "debug" } else { "info" };
    let config = LogConfig::new(level).with_format(format);
    if format == LogFormat::Json {
        config.without_ansi()
    } else {
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = autoapprove_telemetry::setup_logging(&log_config(cli.verbose, cli.log_format)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Run(args) => {
            run::run_action(&args).await?;
        },
        Commands::Check(args) => {
            check::run_check(&args)?;
        },
    }

    Ok(())
}
