//! Front-text lookup over the notes already in the target deck.
//!
//! The table is a snapshot taken before any card is sent. Notes added later in
//! the same run are not in it, so a second card with the same front as one
//! added earlier in the run will miss the lookup.

use crate::anki::{AnkiError, Note, NoteId, NoteStore};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ReconciliationTable {
    by_front: HashMap<String, NoteId>,
}

impl ReconciliationTable {
    /// Fetches every note of `deck` and indexes it by its Front field.
    pub fn load<S: NoteStore + ?Sized>(store: &S, deck: &str) -> Result<Self, AnkiError> {
        let ids = store.find_notes(deck)?;
        let notes = if ids.is_empty() {
            Vec::new()
        } else {
            store.notes_info(&ids)?
        };
        let table = Self::from_notes(notes);
        debug!("indexed {} existing notes in '{}'", table.len(), deck);
        Ok(table)
    }

    /// Later notes win when two share a front.
    pub fn from_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let by_front = notes
            .into_iter()
            .filter_map(|note| {
                let front = note.front()?.to_string();
                Some((front, note.note_id))
            })
            .collect();
        Self { by_front }
    }

    pub fn get(&self, front: &str) -> Option<NoteId> {
        self.by_front.get(front).copied()
    }

    pub fn len(&self) -> usize {
        self.by_front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_front.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anki::{Field, FRONT_FIELD};

    fn note(id: i64, front: &str) -> Note {
        let mut fields = HashMap::new();
        fields.insert(
            FRONT_FIELD.to_string(),
            Field {
                value: front.to_string(),
                order: 0,
            },
        );
        Note {
            note_id: NoteId(id),
            model_name: "Basic".to_string(),
            tags: Vec::new(),
            fields,
        }
    }

    #[test]
    fn test_lookup_by_front() {
        let table = ReconciliationTable::from_notes(vec![note(1, "A"), note(2, "B")]);
        assert_eq!(table.get("A"), Some(NoteId(1)));
        assert_eq!(table.get("B"), Some(NoteId(2)));
        assert_eq!(table.get("C"), None);
    }

    #[test]
    fn test_later_duplicate_front_wins() {
        let table = ReconciliationTable::from_notes(vec![note(1, "A"), note(7, "A")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some(NoteId(7)));
    }

    #[test]
    fn test_notes_without_front_are_skipped() {
        let mut cloze = note(3, "x");
        cloze.fields.clear();
        let table = ReconciliationTable::from_notes(vec![cloze]);
        assert!(table.is_empty());
    }
}
