//! Schema definitions: document types, their groups, fieldsets and fields.
mod block;
mod field;

pub use block::{Annotation, BlockConfig, Marks};
pub use field::{
    ArrayMember, Field, FieldKind, FileOptions, ImageOptions, ListLayout, ListOption,
    SlugOptions, StringOptions,
};

use crate::preview::Preview;
use crate::visibility::Hidden;
use serde::Serialize;
use std::borrow::Cow;

/// A named content shape editors create documents of.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct DocumentType {
    pub name: Cow<'static, str>,
    pub title: Cow<'static, str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fieldsets: Vec<Fieldset>,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

impl DocumentType {
    pub fn new(name: impl Into<Cow<'static, str>>, title: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            groups: Vec::new(),
            fieldsets: Vec::new(),
            fields: Vec::new(),
            preview: None,
        }
    }

    pub fn group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn fieldset(mut self, fieldset: Fieldset) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn preview(mut self, preview: Preview) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Looks up a top-level field.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The group opened first in the editor.
    #[must_use]
    pub fn default_group(&self) -> Option<&Group> {
        self.groups.iter().find(|g| g.default)
    }

    /// Top-level fields assigned to `group`.
    pub fn fields_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.groups.iter().any(|g| g == group))
    }
}

/// An editor tab fields can be assigned to.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Group {
    pub name: Cow<'static, str>,
    pub title: Cow<'static, str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
    #[serde(skip_serializing_if = "Hidden::is_never")]
    pub hidden: Hidden,
}

impl Group {
    pub fn new(name: impl Into<Cow<'static, str>>, title: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), title: title.into(), default: false, hidden: Hidden::Never }
    }

    pub const fn default_group(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn hidden(mut self, hidden: Hidden) -> Self {
        self.hidden = hidden;
        self
    }
}

/// A visual box grouping adjacent fields.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Fieldset {
    pub name: Cow<'static, str>,
    pub title: Cow<'static, str>,
    #[serde(skip_serializing_if = "Hidden::is_never")]
    pub hidden: Hidden,
}

impl Fieldset {
    pub fn new(name: impl Into<Cow<'static, str>>, title: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), title: title.into(), hidden: Hidden::Never }
    }

    pub fn hidden(mut self, hidden: Hidden) -> Self {
        self.hidden = hidden;
        self
    }
}
