mod check;

use crate::error::SchemaError;
use crate::model::DocumentType;
use crate::preview::PreviewValues;
use crate::validation::{Path, ValidationReport, Validator};
use crate::visibility::{self, VisibilityReport};
use atria_domain::constants::{ID_KEY, TYPE_KEY};
use fxhash::FxHashMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// The immutable catalog of document types.
///
/// Built once by [`Registry::register`]; clones share the same definitions, so a
/// registry can be handed to every reader without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    types: Vec<DocumentType>,
    index: FxHashMap<String, usize>,
}

impl Registry {
    /// Checks and registers document types, keeping their order.
    ///
    /// # Errors
    /// Returns [`SchemaError::Configuration`] for the first malformed definition.
    pub fn register(types: impl IntoIterator<Item = DocumentType>) -> Result<Self, SchemaError> {
        let types: Vec<DocumentType> = types.into_iter().collect();
        check::check_all(&types)?;

        let index = types.iter().enumerate().map(|(i, t)| (t.name.to_string(), i)).collect();
        for doc_type in &types {
            debug!(document_type = %doc_type.name, fields = doc_type.fields.len(), "Registered document type");
        }
        info!(count = types.len(), "Schema registry ready");

        Ok(Self { inner: Arc::new(Inner { types, index }) })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocumentType> {
        self.inner.index.get(name).map(|&i| &self.inner.types[i])
    }

    /// Document type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.types.iter().map(|t| t.name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentType> {
        self.inner.types.iter()
    }

    /// The definitions as handed to the host, in registration order.
    #[must_use]
    pub fn types(&self) -> &[DocumentType] {
        &self.inner.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.types.is_empty()
    }

    /// Validates a document against its registered type.
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidDocument`] if the value is not an object with a
    /// `_type`, and [`SchemaError::UnknownType`] if that type is not registered.
    /// Field problems are reported as markers, never as errors.
    pub fn validate(&self, document: &Value) -> Result<ValidationReport, SchemaError> {
        let (doc_type, object) = self.resolve(document)?;
        let id = object.get(ID_KEY).and_then(Value::as_str);

        let mut validator = Validator::new(id);
        validator.fields(&doc_type.fields, object, &Path::root());
        let markers = validator.finish();

        let report = ValidationReport::new(id.map(str::to_owned), doc_type.name.to_string(), markers);
        debug!(
            document_type = %doc_type.name,
            markers = report.markers().len(),
            valid = report.is_valid(),
            "Validated document"
        );
        Ok(report)
    }

    /// Evaluates which fields, groups and fieldsets are hidden for a document.
    ///
    /// # Errors
    /// Same as [`Registry::validate`].
    pub fn visibility(&self, document: &Value) -> Result<VisibilityReport, SchemaError> {
        let (doc_type, object) = self.resolve(document)?;
        Ok(visibility::evaluate(doc_type, object))
    }

    /// The list preview of a document; types without a preview use `title`.
    ///
    /// # Errors
    /// Same as [`Registry::validate`].
    pub fn preview(&self, document: &Value) -> Result<PreviewValues, SchemaError> {
        let (doc_type, object) = self.resolve(document)?;
        Ok(match &doc_type.preview {
            Some(preview) => preview.resolve(object),
            None => PreviewValues::from_selection(
                &object.get("title").map(|t| ("title".to_owned(), t.clone())).into_iter().collect(),
            ),
        })
    }

    /// A new document of `type_name` with its initial values.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownType`] if the type is not registered.
    pub fn initial_document(&self, type_name: &str, id: &str) -> Result<Value, SchemaError> {
        self.get(type_name)
            .map(|t| t.initial_document(id))
            .ok_or_else(|| unknown_type(type_name))
    }

    /// Serialises every definition, each tagged `"type": "document"`.
    ///
    /// # Errors
    /// Returns [`SchemaError::Serialize`] if a definition cannot be serialised.
    pub fn to_json(&self) -> Result<Value, SchemaError> {
        let mut types = Vec::with_capacity(self.len());
        for doc_type in self.iter() {
            let mut value = serde_json::to_value(doc_type)?;
            if let Some(object) = value.as_object_mut() {
                object.insert("type".to_owned(), Value::String("document".to_owned()));
            }
            types.push(value);
        }
        Ok(Value::Array(types))
    }

    fn resolve<'d>(&self, document: &'d Value) -> Result<(&DocumentType, &'d Map<String, Value>), SchemaError> {
        let Some(object) = document.as_object() else {
            return Err(SchemaError::InvalidDocument {
                message: format!("expected an object, got {}", crate::value::json_type(document)).into(),
                context: None,
            });
        };
        let Some(type_name) = object.get(TYPE_KEY).and_then(Value::as_str) else {
            return Err(SchemaError::InvalidDocument { message: "missing `_type`".into(), context: None });
        };
        let doc_type = self.get(type_name).ok_or_else(|| unknown_type(type_name))?;
        Ok((doc_type, object))
    }
}

fn unknown_type(name: &str) -> SchemaError {
    SchemaError::UnknownType { message: format!("'{name}' is not registered").into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::rules::Rule;
    use serde_json::json;

    fn registry() -> Registry {
        Registry::register([
            DocumentType::new("tag", "Tag").field(Field::string("title").rules(Rule::new().required())),
            DocumentType::new("category", "Category").field(Field::string("title")),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_registration_order() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["tag", "category"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("category").unwrap().title, "Category");
        assert!(registry.get("blog").is_none());
    }

    #[test]
    fn rejects_non_documents() {
        let registry = registry();
        assert!(matches!(registry.validate(&json!([1])), Err(SchemaError::InvalidDocument { .. })));
        assert!(matches!(registry.validate(&json!({ "title": "x" })), Err(SchemaError::InvalidDocument { .. })));
        let err = registry.validate(&json!({ "_type": "page" })).unwrap_err();
        assert_eq!(err.to_string(), "Unknown document type: 'page' is not registered");
    }

    #[test]
    fn preview_falls_back_to_title() {
        let preview = registry().preview(&json!({ "_type": "category", "title": "Net Metering" })).unwrap();
        assert_eq!(preview.title, "Net Metering");
    }

    #[test]
    fn clones_share_definitions() {
        let registry = registry();
        let clone = registry.clone();
        assert!(std::ptr::eq(registry.types(), clone.types()));
    }

    #[test]
    fn json_dump_tags_documents() {
        let dump = registry().to_json().unwrap();
        assert_eq!(dump[0]["type"], json!("document"));
        assert_eq!(dump[0]["fields"][0], json!({ "name": "title", "type": "string", "validation": [{ "constraint": "required", "level": "error" }] }));
    }
}
