use super::field::Field;
use crate::rules::Rule;
use crate::validation::uri::UriRule;
use atria_domain::marks::{BlockStyles, Decorators, ListStyles};
use serde::Serialize;
use std::borrow::Cow;

/// A rich text block member: allowed styles, lists, decorators and annotations.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct BlockConfig {
    pub styles: BlockStyles,
    pub lists: ListStyles,
    pub marks: Marks,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marks {
    pub decorators: Decorators,
    pub annotations: Vec<Annotation>,
}

impl BlockConfig {
    pub fn new(styles: BlockStyles, lists: ListStyles, decorators: Decorators) -> Self {
        Self { styles, lists, marks: Marks { decorators, annotations: Vec::new() } }
    }

    /// What a block gets when nothing is configured, including the default link.
    pub fn platform_default() -> Self {
        let href = Field::url("href").title("URL").rules(Rule::new().uri(UriRule::default()));
        Self::with_annotations([Annotation::new("link", [href]).title("Link")])
    }

    /// Platform styles, lists and decorators with the given annotations replacing the
    /// default link.
    pub fn with_annotations(annotations: impl IntoIterator<Item = Annotation>) -> Self {
        let mut block = Self::new(
            BlockStyles::PLATFORM_DEFAULT,
            ListStyles::PLATFORM_DEFAULT,
            Decorators::PLATFORM_DEFAULT,
        );
        block.marks.annotations.extend(annotations);
        block
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.marks.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn get_annotation(&self, name: &str) -> Option<&Annotation> {
        self.marks.annotations.iter().find(|a| a.name == name)
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// A mark carrying data, stored in a block's `markDefs`.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Annotation {
    pub name: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Cow<'static, str>>,
    #[serde(rename = "type")]
    kind: &'static str,
    pub fields: Vec<Field>,
}

impl Annotation {
    pub fn new(name: impl Into<Cow<'static, str>>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self { name: name.into(), title: None, kind: "object", fields: fields.into_iter().collect() }
    }

    pub fn title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = Some(title.into());
        self
    }
}
