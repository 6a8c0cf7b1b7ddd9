//! relsync: synchronize local files with the assets of a GitHub release.
//!
//! # Usage
//!
//! ```text
//! relsync upload [--repo owner/repo] [--release-id N | --tag T] [--delete MASK]... [--overwrite BOOL] FILES...
//! relsync list   [--repo owner/repo] [--release-id N | --tag T]
//! ```
//!
//! Inputs fall back to the environment of a workflow runner (`GITHUB_TOKEN`,
//! `GITHUB_REPOSITORY`, `GITHUB_EVENT_PATH`, `GITHUB_OUTPUT`, ...). Results
//! are printed to stdout as JSON; logs go to stderr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, upload::UploadArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "relsync",
    version,
    about = "Upload files to a GitHub release, replacing assets that already exist",
    long_about = None,
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete assets matching masks, then upload files to the release.
    Upload(UploadArgs),

    /// Print the assets currently attached to the release.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Upload(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}

/// Logs go to stderr; stdout carries only the JSON result.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
