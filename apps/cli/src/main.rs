//! PitchMatch CLI — pitch-to-investor matching tool.
//!
//! Scrapes investor profiles, classifies a startup pitch with a remote
//! reasoning API, and writes a combined match-result artifact.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
