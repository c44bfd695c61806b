//! NoteStore trait - the operations the converter needs from a note store.
//!
//! [`AnkiConnect`](super::AnkiConnect) is the real implementation; tests
//! drive the converter with an in-memory store instead.

use super::{AddOutcome, AnkiError, Note, NoteId};

pub trait NoteStore {
    /// Names of every deck in the collection.
    fn deck_names(&self) -> Result<Vec<String>, AnkiError>;

    /// Creates `name` unless it already exists.
    fn create_deck(&self, name: &str) -> Result<(), AnkiError>;

    /// Ids of the notes that live directly in `deck`, in store order.
    fn find_notes(&self, deck: &str) -> Result<Vec<NoteId>, AnkiError>;

    /// Full records for `ids`, in the same order.
    fn notes_info(&self, ids: &[NoteId]) -> Result<Vec<Note>, AnkiError>;

    /// Adds a Basic note to `deck`.
    fn add_note(
        &self,
        deck: &str,
        front: &str,
        back: &str,
        tags: &[String],
    ) -> Result<AddOutcome, AnkiError>;

    /// Overwrites the Front and Back fields of an existing note.
    fn update_note_fields(&self, id: NoteId, front: &str, back: &str) -> Result<(), AnkiError>;
}
