//! latex2anki - LaTeX flash cards to Anki.
//!
//! Pipeline: parse `flashcard` blocks from a LaTeX file -> build Front/Back
//! fields -> add (or update) Basic notes through AnkiConnect.

pub mod anki;
pub mod config;
pub mod convert;
pub mod latex;

pub use anki::{AnkiConnect, AnkiError, NoteStore};
pub use config::Config;
pub use convert::{CardOutcome, ConvertOptions, Converter};
pub use latex::{parse_flashcards, Flashcard, ParseError};
