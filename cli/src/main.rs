#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{StorageArgs, VersionArgs};

#[derive(Debug, Parser)]
#[command(
    name = "storage-check",
    about = "Validate state storage settings and state file version records"
)]
struct Cli {
    /// Log every validation step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a storage configuration
    Storage(StorageArgs),
    /// Validate a state file version record
    Version(VersionArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let report = match cli.command {
        Command::Storage(args) => commands::check_storage(&args)?,
        Command::Version(args) => commands::check_version(&args)?,
    };
    println!("{report}");

    Ok(())
}

/// `--verbose` forces debug; otherwise `RUST_LOG` applies, defaulting to info.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
