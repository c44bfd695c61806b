use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Note type every card is created with.
pub const MODEL_NAME: &str = "Basic";
pub const FRONT_FIELD: &str = "Front";
pub const BACK_FIELD: &str = "Back";

/// Identifier the store assigns to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of an `addNote` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created(NoteId),
    /// A note with the same front already exists.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

/// A note as reported by `notesInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub note_id: NoteId,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fields: HashMap<String, Field>,
}

impl Note {
    pub fn front(&self) -> Option<&str> {
        self.fields.get(FRONT_FIELD).map(|f| f.value.as_str())
    }

    pub fn back(&self) -> Option<&str> {
        self.fields.get(BACK_FIELD).map(|f| f.value.as_str())
    }
}

/// Payload of an `addNote` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote<'a> {
    pub deck_name: &'a str,
    pub model_name: &'a str,
    pub fields: NoteFields<'a>,
    pub tags: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteFields<'a> {
    #[serde(rename = "Front")]
    pub front: &'a str,
    #[serde(rename = "Back")]
    pub back: &'a str,
}

/// Payload of an `updateNoteFields` request.
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate<'a> {
    pub id: NoteId,
    pub fields: NoteFields<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_from_notes_info() {
        let raw = json!({
            "noteId": 1502298033753i64,
            "modelName": "Basic",
            "tags": ["math"],
            "fields": {
                "Front": {"value": "front content", "order": 0},
                "Back": {"value": "back content", "order": 1}
            },
            "cards": [1498938915662i64]
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.note_id, NoteId(1502298033753));
        assert_eq!(note.front(), Some("front content"));
        assert_eq!(note.back(), Some("back content"));
    }

    #[test]
    fn test_new_note_wire_shape() {
        let tags = vec!["latex".to_string()];
        let note = NewNote {
            deck_name: "Default",
            model_name: MODEL_NAME,
            fields: NoteFields {
                front: "A",
                back: "B",
            },
            tags: &tags,
        };
        assert_eq!(
            serde_json::to_value(&note).unwrap(),
            json!({
                "deckName": "Default",
                "modelName": "Basic",
                "fields": {"Front": "A", "Back": "B"},
                "tags": ["latex"]
            })
        );
    }
}
