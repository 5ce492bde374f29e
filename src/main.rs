//! CLI entry point for distance matrix generation and clue queries

use clap::Parser;
use regionsleuth::io::cli::{Cli, CommandRunner};
use tracing_subscriber::EnvFilter;

fn main() -> regionsleuth::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    CommandRunner::new(cli).run()
}
