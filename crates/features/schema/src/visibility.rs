//! Conditional visibility of fields, groups and fieldsets.
//!
//! A [`Hidden`] rule is a pure function of the enclosing object. Evaluating it never
//! touches the document, so values of hidden fields survive toggling a section off
//! and on again.

use crate::model::{DocumentType, Field, FieldKind};
use crate::validation::Path;
use crate::value;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Predicate over the enclosing object.
pub type HiddenFn = fn(&Map<String, Value>) -> bool;

#[derive(Debug, Clone, Default)]
pub enum Hidden {
    #[default]
    Never,
    Always,
    /// Hidden unless the named sibling is truthy (a "show this section" toggle).
    Unless(Cow<'static, str>),
    /// Hidden when the predicate holds.
    When(HiddenFn),
}

impl Hidden {
    pub fn unless(toggle: impl Into<Cow<'static, str>>) -> Self {
        Self::Unless(toggle.into())
    }

    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Evaluates the rule against the object holding the field.
    #[must_use]
    pub fn is_hidden(&self, parent: &Map<String, Value>) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Unless(toggle) => !value::truthy(parent.get(&**toggle)),
            Self::When(predicate) => predicate(parent),
        }
    }

    /// The sibling a toggle rule reads.
    #[must_use]
    pub fn toggle(&self) -> Option<&str> {
        match self {
            Self::Unless(toggle) => Some(toggle),
            _ => None,
        }
    }
}

impl Serialize for Hidden {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Unless<'a> {
            unless: &'a str,
        }

        match self {
            Self::Never => serializer.serialize_bool(false),
            Self::Always => serializer.serialize_bool(true),
            Self::Unless(toggle) => Unless { unless: toggle }.serialize(serializer),
            Self::When(_) => serializer.serialize_str("conditional"),
        }
    }
}

/// What is hidden for one document state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityReport {
    pub hidden_fields: Vec<Path>,
    pub hidden_groups: Vec<String>,
    pub hidden_fieldsets: Vec<String>,
}

impl VisibilityReport {
    /// Whether the field at `path` (as displayed, e.g. `hero` or `faq.items[0].answer`) is hidden.
    #[must_use]
    pub fn is_field_hidden(&self, path: &str) -> bool {
        self.hidden_fields.iter().any(|p| p.to_string() == path)
    }
}

/// Evaluates every visibility rule of `doc_type` for `document`.
///
/// Fields below a hidden field are not reported separately.
#[must_use]
pub fn evaluate(doc_type: &DocumentType, document: &Map<String, Value>) -> VisibilityReport {
    let mut report = VisibilityReport {
        hidden_groups: doc_type
            .groups
            .iter()
            .filter(|g| g.hidden.is_hidden(document))
            .map(|g| g.name.to_string())
            .collect(),
        hidden_fieldsets: doc_type
            .fieldsets
            .iter()
            .filter(|f| f.hidden.is_hidden(document))
            .map(|f| f.name.to_string())
            .collect(),
        ..VisibilityReport::default()
    };
    walk_fields(&doc_type.fields, document, &Path::root(), &mut report.hidden_fields);
    report
}

fn walk_fields(fields: &[Field], object: &Map<String, Value>, path: &Path, hidden: &mut Vec<Path>) {
    for field in fields {
        let field_path = path.field(field.name.clone());
        if field.hidden.is_hidden(object) {
            hidden.push(field_path);
            continue;
        }
        if let Some(value) = object.get(&*field.name) {
            walk_value(&field.kind, value, &field_path, hidden);
        }
    }
}

fn walk_value(kind: &FieldKind, value: &Value, path: &Path, hidden: &mut Vec<Path>) {
    match (kind, value) {
        (FieldKind::Array { of }, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let Some(object) = item.as_object() else { continue };
                let member_fields = of.iter().find_map(|m| {
                    let matches = object
                        .get("_type")
                        .and_then(Value::as_str)
                        .map_or(matches!(m.kind, FieldKind::Object { .. }), |t| t == m.type_name());
                    if matches { m.kind.nested_fields() } else { None }
                });
                if let Some(fields) = member_fields {
                    walk_fields(fields, object, &path.item(item, index), hidden);
                }
            }
        },
        (kind, Value::Object(object)) => {
            if let Some(fields) = kind.nested_fields() {
                walk_fields(fields, object, path, hidden);
            }
        },
        _ => {},
    }
}
