//! CLI entry point for the webext-compat report.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use webext_compat::{CompatSource, RunSummary, SourceConfig, run};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    tokio::select! {
        result = run_report() => match result {
            Ok(summary) => {
                debug!(?summary, "report finished");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("\nError: {error:#}");
                ExitCode::FAILURE
            }
        },
        () = wait_for_interrupt(tokio::signal::ctrl_c()) => {
            eprintln!("\n\nInterrupted by user");
            ExitCode::FAILURE
        }
    }
}

/// Resolves once `signal` reports an interrupt. If the handler could not be
/// installed, never resolves so the report runs to completion.
async fn wait_for_interrupt(signal: impl Future<Output = io::Result<()>>) {
    if let Err(error) = signal.await {
        warn!(error = %error, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn run_report() -> Result<RunSummary> {
    let config = SourceConfig::from_env().context("invalid environment configuration")?;
    debug!(?config, "source configuration loaded");

    let source = CompatSource::new(config).context("failed to set up HTTP client")?;
    let mut stdout = io::stdout();
    run(&source, &mut stdout)
        .await
        .context("failed to write report")
}
