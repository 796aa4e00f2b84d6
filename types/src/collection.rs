//! Collection normalizer: both on-disk shapes of a data file.
//!
//! A collection file is either a bare array of records or an object
//! holding that array under a named key (`auteurs`, `evenements`).

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Key under which authors are wrapped in the object form.
pub const AUTHORS_KEY: &str = "auteurs";
/// Key under which events are wrapped in the object form.
pub const EVENTS_KEY: &str = "evenements";

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an array or an object with `{key}`, found {found}")]
    Shape { key: String, found: &'static str },
}

/// Parse a collection document from text.
pub fn parse_collection<T: DeserializeOwned>(json: &str, key: &str) -> Result<Vec<T>, CollectionError> {
    let value: Value = serde_json::from_str(json)?;
    collection_from_value(value, key)
}

/// Normalize an already-parsed document into a list of records.
///
/// Records that do not deserialize are skipped with a warning so that
/// one bad entry does not empty the whole collection.
pub fn collection_from_value<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, CollectionError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                tracing::debug!(key, "collection object has no records");
                Vec::new()
            }
            Some(other) => {
                return Err(CollectionError::Shape {
                    key: key.to_string(),
                    found: kind_of(&other),
                });
            }
        },
        other => {
            return Err(CollectionError::Shape {
                key: key.to_string(),
                found: kind_of(&other),
            });
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::warn!(key, index = i, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(key, kept = records.len(), total, "some records were dropped");
    }
    Ok(records)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Author, Event};

    #[test]
    fn test_bare_array() {
        let authors: Vec<Author> =
            parse_collection(r#"[{"id":"A1","nom":"Basile"},{"id":"A2","nom":"Jérôme"}]"#, AUTHORS_KEY)
                .unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].nom, "Jérôme");
    }

    #[test]
    fn test_wrapped_object() {
        let events: Vec<Event> =
            parse_collection(r#"{"evenements":[{"id":"E1","nom":"Chalcédoine"}]}"#, EVENTS_KEY).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "E1");
    }

    #[test]
    fn test_object_without_key_is_empty() {
        let events: Vec<Event> = parse_collection(r#"{"auteurs":[]}"#, EVENTS_KEY).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        // Second record lacks the required id.
        let authors: Vec<Author> =
            parse_collection(r#"[{"id":"A1"},{"nom":"sans id"},{"id":"A3"}]"#, AUTHORS_KEY).unwrap();
        let ids: Vec<&str> = authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);
    }

    #[test]
    fn test_wrong_shapes() {
        assert!(matches!(
            parse_collection::<Author>("42", AUTHORS_KEY),
            Err(CollectionError::Shape { found: "a number", .. })
        ));
        assert!(matches!(
            parse_collection::<Author>(r#"{"auteurs":"x"}"#, AUTHORS_KEY),
            Err(CollectionError::Shape { found: "a string", .. })
        ));
        assert!(matches!(
            parse_collection::<Author>("[{", AUTHORS_KEY),
            Err(CollectionError::Json(_))
        ));
    }
}
