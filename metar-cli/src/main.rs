//! Binary crate for the `metar` command-line tool.
//!
//! Decodes reports given as arguments or on stdin, with per-run overrides of
//! the saved settings, and runs the interactive `configure` prompts.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run()
}
