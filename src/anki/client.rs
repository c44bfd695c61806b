//! AnkiConnect HTTP client.
//!
//! Every action is a POST of `{"action", "params", "version"}` to the
//! endpoint root; the reply is `{"result", "error"}`. A non-null `error`
//! fails the call whatever the HTTP status says.

use super::{
    AddOutcome, AnkiError, NewNote, Note, NoteFields, NoteId, NoteStore, NoteUpdate, MODEL_NAME,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, trace};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8765;

/// Protocol version sent when the caller does not ask for one.
pub const API_VERSION: u32 = 6;

/// Blocking client for one AnkiConnect endpoint.
pub struct AnkiConnect {
    client: reqwest::blocking::Client,
    url: String,
}

impl Default for AnkiConnect {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl AnkiConnect {
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_client(host, port, reqwest::blocking::Client::new())
    }

    /// Uses a preconfigured HTTP client (timeouts, proxy settings).
    pub fn with_client(host: &str, port: u16, client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            url: format!("http://{}:{}/", host, port),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs one action and returns its `result`.
    pub fn send(
        &self,
        action: &str,
        params: Option<Value>,
        version: Option<u32>,
    ) -> Result<Value, AnkiError> {
        let body = request_body(action, params, version.unwrap_or(API_VERSION));
        debug!("AnkiConnect -> {}", action);
        trace!("request body: {}", body);

        let transport = |source| AnkiError::Transport {
            url: self.url.clone(),
            source,
        };
        let text = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .and_then(|response| response.text())
            .map_err(transport)?;

        trace!("response body: {}", text);
        parse_response(&text)
    }

    fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Option<Value>,
    ) -> Result<T, AnkiError> {
        let result = self.send(action, params, None)?;
        serde_json::from_value(result).map_err(|source| AnkiError::Decode {
            action: action.to_string(),
            source,
        })
    }

    /// Protocol version the add-on speaks. Also serves as the connectivity check.
    pub fn version(&self) -> Result<u32, AnkiError> {
        self.invoke("version", None)
    }

    /// Asks the add-on to upgrade itself. Returns whether it did.
    pub fn upgrade(&self) -> Result<bool, AnkiError> {
        self.invoke("upgrade", None)
    }
}

impl NoteStore for AnkiConnect {
    fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke("deckNames", None)
    }

    fn create_deck(&self, name: &str) -> Result<(), AnkiError> {
        let deck_id: Value = self.invoke("createDeck", Some(json!({ "deck": name })))?;
        debug!("deck '{}' has id {}", name, deck_id);
        Ok(())
    }

    fn find_notes(&self, deck: &str) -> Result<Vec<NoteId>, AnkiError> {
        self.invoke("findNotes", Some(json!({ "query": deck_query(deck) })))
    }

    fn notes_info(&self, ids: &[NoteId]) -> Result<Vec<Note>, AnkiError> {
        self.invoke("notesInfo", Some(json!({ "notes": ids })))
    }

    fn add_note(
        &self,
        deck: &str,
        front: &str,
        back: &str,
        tags: &[String],
    ) -> Result<AddOutcome, AnkiError> {
        let note = NewNote {
            deck_name: deck,
            model_name: MODEL_NAME,
            fields: NoteFields { front, back },
            tags,
        };
        add_outcome(self.invoke("addNote", Some(json!({ "note": note }))))
    }

    fn update_note_fields(&self, id: NoteId, front: &str, back: &str) -> Result<(), AnkiError> {
        let note = NoteUpdate {
            id,
            fields: NoteFields { front, back },
        };
        self.send("updateNoteFields", Some(json!({ "note": note })), None)?;
        Ok(())
    }
}

/// Maps an `addNote` reply onto [`AddOutcome`].
///
/// The store signals an existing note either with a null result or with its
/// duplicate error; any id it returns, `0` included, is a created note.
pub fn add_outcome(reply: Result<Option<NoteId>, AnkiError>) -> Result<AddOutcome, AnkiError> {
    match reply {
        Ok(Some(id)) => Ok(AddOutcome::Created(id)),
        Ok(None) => Ok(AddOutcome::Duplicate),
        Err(e) if e.is_duplicate() => Ok(AddOutcome::Duplicate),
        Err(e) => Err(e),
    }
}

/// Builds the JSON envelope for one action.
pub fn request_body(action: &str, params: Option<Value>, version: u32) -> Value {
    json!({
        "action": action,
        "params": params.unwrap_or_else(|| Value::Object(Map::new())),
        "version": version,
    })
}

/// Splits a reply into its `result`, or the error the store reported.
pub fn parse_response(text: &str) -> Result<Value, AnkiError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| AnkiError::Malformed(e.to_string()))?;

    let Value::Object(mut reply) = value else {
        return Err(AnkiError::Malformed(
            "response is not a JSON object".to_string(),
        ));
    };
    if reply.len() != 2 {
        return Err(AnkiError::Malformed(
            "response has an unexpected number of fields".to_string(),
        ));
    }
    let error = reply.remove("error").ok_or_else(|| {
        AnkiError::Malformed("response is missing required error field".to_string())
    })?;
    let result = reply.remove("result").ok_or_else(|| {
        AnkiError::Malformed("response is missing required result field".to_string())
    })?;

    match error {
        Value::Null => Ok(result),
        Value::String(message) => Err(AnkiError::Remote(message)),
        other => Err(AnkiError::Remote(other.to_string())),
    }
}

/// Search query matching the notes of `deck` itself, not of its subdecks.
///
/// Anki treats `*` and `_` as wildcards and `"`/`\` as syntax, so all four are
/// backslash-escaped inside the quoted deck name.
pub fn deck_query(deck: &str) -> String {
    let mut escaped = String::with_capacity(deck.len());
    for c in deck.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("deck:\"{0}\" -deck:\"{0}::*\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_defaults_params() {
        assert_eq!(
            request_body("deckNames", None, API_VERSION),
            json!({"action": "deckNames", "params": {}, "version": 6})
        );
    }

    #[test]
    fn test_request_body_keeps_params_and_version() {
        let body = request_body("createDeck", Some(json!({"deck": "Math"})), 5);
        assert_eq!(body["params"]["deck"], "Math");
        assert_eq!(body["version"], 5);
    }

    #[test]
    fn test_parse_response_result() {
        let result = parse_response(r#"{"result": [1, 2], "error": null}"#).unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn test_parse_response_null_result_is_not_an_error() {
        assert_eq!(
            parse_response(r#"{"result": null, "error": null}"#).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_parse_response_remote_error() {
        let err =
            parse_response(r#"{"result": null, "error": "deck was not found"}"#).unwrap_err();
        assert!(matches!(err, AnkiError::Remote(ref m) if m == "deck was not found"));
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_duplicate_error_is_recognized() {
        let err = parse_response(
            r#"{"result": null, "error": "cannot create note because it is a duplicate"}"#,
        )
        .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_add_outcome_created() {
        assert_eq!(
            add_outcome(Ok(Some(NoteId(1496198395707)))).unwrap(),
            AddOutcome::Created(NoteId(1496198395707))
        );
        assert_eq!(
            add_outcome(Ok(Some(NoteId(0)))).unwrap(),
            AddOutcome::Created(NoteId(0))
        );
    }

    #[test]
    fn test_add_outcome_null_result_is_duplicate() {
        assert_eq!(add_outcome(Ok(None)).unwrap(), AddOutcome::Duplicate);
    }

    #[test]
    fn test_add_outcome_duplicate_error_is_duplicate() {
        let err = AnkiError::Remote("cannot create note because it is a duplicate".to_string());
        assert_eq!(add_outcome(Err(err)).unwrap(), AddOutcome::Duplicate);
    }

    #[test]
    fn test_add_outcome_other_errors_are_fatal() {
        let err = AnkiError::Remote("model was not found: Basic".to_string());
        assert!(matches!(
            add_outcome(Err(err)),
            Err(AnkiError::Remote(ref m)) if m == "model was not found: Basic"
        ));

        let err = AnkiError::Remote("deck was not found: duplicate-cards".to_string());
        assert!(add_outcome(Err(err)).is_err());
    }

    #[test]
    fn test_parse_response_missing_fields() {
        assert!(matches!(
            parse_response(r#"{"result": 1, "other": null}"#),
            Err(AnkiError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"result": 1}"#),
            Err(AnkiError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_response_not_json() {
        assert!(matches!(
            parse_response("<html>502</html>"),
            Err(AnkiError::Malformed(_))
        ));
        assert!(matches!(parse_response("[]"), Err(AnkiError::Malformed(_))));
    }

    #[test]
    fn test_deck_query_plain() {
        assert_eq!(deck_query("Default"), r#"deck:"Default" -deck:"Default::*""#);
    }

    #[test]
    fn test_deck_query_escapes_reserved_characters() {
        assert_eq!(
            deck_query(r#"my_deck "*""#),
            r#"deck:"my\_deck \"\*\"" -deck:"my\_deck \"\*\"::*""#
        );
    }

    #[test]
    fn test_default_url() {
        assert_eq!(AnkiConnect::default().url(), "http://localhost:8765/");
    }
}
