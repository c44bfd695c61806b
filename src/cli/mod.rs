//! CLI definitions and command implementations for latex2anki.

pub mod commands;

use clap::Parser;
use std::path::PathBuf;

/// Convert LaTeX flash cards to Anki notes
#[derive(Parser, Debug)]
#[command(name = "latex2anki")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// LaTeX file containing flashcard blocks
    pub input: PathBuf,

    /// Host where AnkiConnect listens
    #[arg(short = 't', long)]
    pub host: Option<String>,

    /// Port where AnkiConnect listens
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Target deck (default: Default)
    #[arg(short, long)]
    pub deck: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Update notes that already exist instead of skipping them
    #[arg(short, long)]
    pub upgrade: bool,

    /// Ask AnkiConnect to upgrade itself before converting
    #[arg(long)]
    pub upgrade_anki_connect: bool,

    /// Tag to attach to new notes (repeatable)
    #[arg(short = 'g', long = "tag")]
    pub tags: Vec<String>,

    /// Config file (default: ~/.config/latex2anki/latex2anki.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
