use thiserror::Error;

/// Failure talking to AnkiConnect.
///
/// Every remote operation surfaces this one type. None of the variants is
/// retried: the first failure aborts the operation that issued the call.
#[derive(Debug, Error)]
pub enum AnkiError {
    /// The store answered with a non-null `error` field.
    #[error("AnkiConnect error: {0}")]
    Remote(String),

    /// The request never produced a response body.
    #[error("cannot reach AnkiConnect at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a well-formed AnkiConnect reply.
    #[error("malformed AnkiConnect response: {0}")]
    Malformed(String),

    /// The `result` field does not have the shape the action promises.
    #[error("unexpected result for '{action}': {source}")]
    Decode {
        action: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error text AnkiConnect uses when `addNote` hits an existing note.
pub const DUPLICATE_NOTE: &str = "cannot create note because it is a duplicate";

impl AnkiError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AnkiError::Remote(message) if message == DUPLICATE_NOTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_exact_duplicate_message_matches() {
        assert!(AnkiError::Remote(DUPLICATE_NOTE.to_string()).is_duplicate());
        let unrelated = AnkiError::Remote("deck was not found: duplicate-cards".to_string());
        assert!(!unrelated.is_duplicate());
        assert!(!AnkiError::Malformed(DUPLICATE_NOTE.to_string()).is_duplicate());
    }
}
