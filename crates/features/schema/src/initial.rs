//! Initial values for new documents.

use crate::model::{DocumentType, Field, FieldKind};
use atria_domain::constants::{ARRAY_KEY, ID_KEY, TYPE_KEY};
use atria_kernel::array_key;
use chrono::{SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// What a field holds when a document is created.
#[derive(Debug, Clone, PartialEq)]
pub enum Initial {
    Value(Value),
    /// The creation time, as an RFC 3339 UTC timestamp with milliseconds.
    Now,
}

impl Initial {
    #[must_use]
    pub fn resolve(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Now => Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl Serialize for Initial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Now => serializer.serialize_str("now()"),
        }
    }
}

impl DocumentType {
    /// A new document of this type with `_id`, `_type` and every initial value.
    #[must_use]
    pub fn initial_document(&self, id: &str) -> Value {
        let mut document = Map::new();
        document.insert(ID_KEY.to_owned(), Value::String(id.to_owned()));
        document.insert(TYPE_KEY.to_owned(), Value::String(self.name.to_string()));
        document.extend(initial_values(&self.fields));
        Value::Object(document)
    }
}

/// Initial values of `fields`, descending into objects that have none of their own.
fn initial_values(fields: &[Field]) -> Map<String, Value> {
    let mut values = Map::new();
    for field in fields {
        let value = match (&field.initial, &field.kind) {
            (Some(initial), _) => with_array_keys(initial.resolve()),
            (None, FieldKind::Object { fields, .. }) => {
                let nested = initial_values(fields);
                if nested.is_empty() {
                    continue;
                }
                Value::Object(nested)
            },
            (None, _) => continue,
        };
        values.insert(field.name.to_string(), value);
    }
    values
}

/// Gives object items of an initial array the `_key` every array item needs.
fn with_array_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(mut object) => {
                        if !object.contains_key(ARRAY_KEY) {
                            object.insert(ARRAY_KEY.to_owned(), Value::String(array_key!()));
                        }
                        Value::Object(object)
                    },
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArrayMember;
    use serde_json::json;

    #[test]
    fn builds_initial_document() {
        let doc_type = DocumentType::new("blog", "Blog").fields([
            Field::string("title"),
            Field::boolean("isFeatured").initial(false),
            Field::datetime("publishedAt").initial_now(),
            Field::object("settings", [Field::string("currency").initial("INR")]),
            Field::object("empty", [Field::string("note")]),
        ]);

        let doc = doc_type.initial_document("drafts.blog-1");
        assert_eq!(doc["_id"], json!("drafts.blog-1"));
        assert_eq!(doc["_type"], json!("blog"));
        assert_eq!(doc["isFeatured"], json!(false));
        assert_eq!(doc["settings"], json!({ "currency": "INR" }));
        assert!(doc.get("title").is_none());
        assert!(doc.get("empty").is_none());

        let published = doc["publishedAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(published).is_ok());
        assert!(published.ends_with('Z'));
    }

    #[test]
    fn array_items_get_keys() {
        let field = Field::array("items", Vec::<ArrayMember>::new()).initial(json!([{ "question": "Why solar?" }, "plain"]));
        let values = initial_values(&[field]);
        let items = values["items"].as_array().unwrap();
        assert_eq!(items[0]["_key"].as_str().unwrap().len(), 12);
        assert_eq!(items[1], json!("plain"));
        assert_eq!(serde_json::to_value(Initial::Now).unwrap(), json!("now()"));
    }
}
