//! Command implementation for the latex2anki CLI.

use super::Cli;
use anyhow::{Context, Result};
use colored::Colorize;
use latex2anki::{parse_flashcards, AnkiConnect, Config, ConvertOptions, Converter};
use tracing::{debug, info, warn};

/// Endpoint and conversion options after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub options: ConvertOptions,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let tags = if cli.tags.is_empty() {
            config.tags
        } else {
            cli.tags.clone()
        };
        Self {
            host: cli.host.clone().unwrap_or(config.anki.host),
            port: cli.port.unwrap_or(config.anki.port),
            options: ConvertOptions {
                deck: cli.deck.clone().unwrap_or(config.deck),
                upgrade: cli.upgrade || config.upgrade,
                tags,
            },
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

/// Parses the input file and sends its cards to Anki.
pub fn convert(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli, load_config(cli)?);
    debug!("settings: {:?}", settings);

    let input = cli.input.display().to_string();
    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Cannot read input file: {}", input))?;
    let cards =
        parse_flashcards(&source).with_context(|| format!("Cannot parse flashcards in {}", input))?;

    if cards.is_empty() {
        warn!("No flashcards found in {}", input);
    }
    println!(
        "{} {} flashcard(s) in {}",
        "Found".green(),
        cards.len().to_string().cyan(),
        input.white().bold()
    );

    let client = AnkiConnect::new(&settings.host, settings.port);
    let api_version = client
        .version()
        .with_context(|| format!("Cannot reach AnkiConnect at {}", client.url()))?;
    debug!("AnkiConnect API version {}", api_version);

    if cli.upgrade_anki_connect {
        let upgraded = client
            .upgrade()
            .with_context(|| format!("Cannot upgrade AnkiConnect at {}", client.url()))?;
        if upgraded {
            info!("AnkiConnect upgraded");
        } else {
            info!("AnkiConnect was not upgraded");
        }
    }

    println!(
        "{} deck '{}' via {}",
        "Syncing".cyan(),
        settings.options.deck,
        client.url()
    );
    Converter::new(&client, &settings.options)
        .run(&cards)
        .with_context(|| format!("Sync with AnkiConnect at {} failed", client.url()))?;

    println!("{}", "Done.".green().bold());
    Ok(())
}
