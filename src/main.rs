//! latex2anki CLI - Convert LaTeX flash cards to Anki notes
//!
//! Usage:
//!   latex2anki notes.tex                  - add new cards to the Default deck
//!   latex2anki -d Physics -u notes.tex    - add to Physics, updating existing cards

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("latex2anki={}", log_level).parse()?),
        )
        .with_target(false)
        .init();

    cli::commands::convert(&cli)
}
