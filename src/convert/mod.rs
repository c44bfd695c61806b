//! Convert module - pushes parsed flashcards into a note store.
//!
//! One run goes through these steps, in order:
//! 1. Make sure the target deck exists, creating it if needed.
//! 2. In upgrade mode, snapshot the deck's notes into a [`ReconciliationTable`].
//! 3. For each card, try `addNote`. A duplicate is either updated in place
//!    (upgrade mode, front found in the table) or skipped.
//!
//! Any store error aborts the run. The one failure that does not is a
//! duplicate whose front is missing from the table: it is logged and the run
//! moves on to the next card.

pub mod card_text;
pub mod table;

pub use card_text::{back_text, escape_html, front_text};
pub use table::ReconciliationTable;

use crate::anki::{AddOutcome, AnkiError, NoteId, NoteStore};
use crate::latex::Flashcard;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_DECK: &str = "Default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Deck every card goes into.
    pub deck: String,
    /// Overwrite existing notes instead of skipping them.
    pub upgrade: bool,
    /// Tags attached to newly added notes.
    pub tags: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            deck: DEFAULT_DECK.to_string(),
            upgrade: false,
            tags: Vec::new(),
        }
    }
}

/// What happened to one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    Added(NoteId),
    Upgraded(NoteId),
    Skipped,
    /// Duplicate in upgrade mode, but the existing note was not in the table.
    LookupMiss,
}

/// A duplicate card whose front has no entry in the reconciliation table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no existing note with front '{front}' in deck '{deck}'")]
pub struct LookupMiss {
    pub front: String,
    pub deck: String,
}

pub struct Converter<'a, S: NoteStore + ?Sized> {
    store: &'a S,
    options: &'a ConvertOptions,
}

impl<'a, S: NoteStore + ?Sized> Converter<'a, S> {
    pub fn new(store: &'a S, options: &'a ConvertOptions) -> Self {
        Self { store, options }
    }

    /// Creates the target deck if the store does not have it. Returns whether it was created.
    pub fn ensure_deck(&self) -> Result<bool, AnkiError> {
        let deck = &self.options.deck;
        if self.store.deck_names()?.iter().any(|name| name == deck) {
            return Ok(false);
        }
        self.store.create_deck(deck)?;
        info!("Created deck '{}'", deck);
        Ok(true)
    }

    /// Sends every card to the store, in order.
    pub fn run(&self, cards: &[Flashcard]) -> Result<Vec<CardOutcome>, AnkiError> {
        self.ensure_deck()?;

        let table = if self.options.upgrade {
            Some(ReconciliationTable::load(self.store, &self.options.deck)?)
        } else {
            None
        };

        cards
            .iter()
            .map(|card| self.convert_card(card, table.as_ref()))
            .collect()
    }

    fn convert_card(
        &self,
        card: &Flashcard,
        table: Option<&ReconciliationTable>,
    ) -> Result<CardOutcome, AnkiError> {
        let front = front_text(card);
        let back = back_text(card);

        let outcome = self
            .store
            .add_note(&self.options.deck, &front, &back, &self.options.tags)?;

        let table = match (outcome, table) {
            (AddOutcome::Created(id), _) => {
                info!("Added '{}' (note {})", front, id);
                return Ok(CardOutcome::Added(id));
            }
            (AddOutcome::Duplicate, None) => {
                info!("Skipped '{}': already in '{}'", front, self.options.deck);
                return Ok(CardOutcome::Skipped);
            }
            (AddOutcome::Duplicate, Some(table)) => table,
        };

        match self.lookup(table, &front) {
            Ok(id) => {
                self.store.update_note_fields(id, &front, &back)?;
                info!("Upgraded '{}' (note {})", front, id);
                Ok(CardOutcome::Upgraded(id))
            }
            Err(miss) => {
                error!("line {}: cannot upgrade card: {}", card.line, miss);
                Ok(CardOutcome::LookupMiss)
            }
        }
    }

    fn lookup(&self, table: &ReconciliationTable, front: &str) -> Result<NoteId, LookupMiss> {
        table.get(front).ok_or_else(|| LookupMiss {
            front: front.to_string(),
            deck: self.options.deck.clone(),
        })
    }
}
