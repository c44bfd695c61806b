//! Anki module - talks to the Anki desktop app through the AnkiConnect add-on.

pub mod client;
pub mod error;
pub mod store;
pub mod types;

pub use client::{AnkiConnect, API_VERSION, DEFAULT_HOST, DEFAULT_PORT};
pub use error::AnkiError;
pub use store::NoteStore;
pub use types::{
    AddOutcome, Field, NewNote, Note, NoteFields, NoteId, NoteUpdate, BACK_FIELD, FRONT_FIELD,
    MODEL_NAME,
};
