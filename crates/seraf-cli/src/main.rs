//! seraf - layered backend module scaffolder
//!
//! Reads a TypeScript model interface and generates the repository,
//! use-case, controller and route files of an Express + Mongoose module.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing on stderr so `--json` output stays clean.
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "seraf=debug,seraf_core=debug,seraf_codegen=debug"
    } else {
        "seraf=info,seraf_core=info,seraf_codegen=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}
