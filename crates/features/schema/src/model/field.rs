use super::block::BlockConfig;
use crate::initial::Initial;
use crate::preview::Preview;
use crate::rules::Rule;
use crate::visibility::Hidden;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use strum_macros::IntoStaticStr;

/// Slugs without an explicit limit are capped like the platform does.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 200;

/// A named, typed slot in a document type or nested object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Field {
    pub name: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Cow<'static, str>>,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(rename = "group", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldset: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Hidden::is_never")]
    pub hidden: Hidden,
    #[serde(rename = "validation", skip_serializing_if = "rule_is_empty")]
    pub rules: Rule,
    #[serde(rename = "initialValue", skip_serializing_if = "Option::is_none")]
    pub initial: Option<Initial>,
}

fn rule_is_empty(rule: &Rule) -> bool {
    rule.checks().is_empty()
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            kind,
            groups: Vec::new(),
            fieldset: None,
            hidden: Hidden::Never,
            rules: Rule::new(),
            initial: None,
        }
    }

    pub fn string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::String { options: None })
    }

    pub fn text(name: impl Into<Cow<'static, str>>, rows: u8) -> Self {
        Self::new(name, FieldKind::Text { rows: Some(rows) })
    }

    pub fn boolean(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn number(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn datetime(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Datetime)
    }

    pub fn url(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    /// A slug derived from the sibling field `source`.
    pub fn slug(
        name: impl Into<Cow<'static, str>>,
        source: impl Into<Cow<'static, str>>,
        max_length: usize,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Slug {
                options: SlugOptions { source: Some(source.into()), max_length: Some(max_length) },
            },
        )
    }

    pub fn image(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, FieldKind::Image { options: ImageOptions::default(), fields: Vec::new() })
    }

    /// A file upload restricted to MIME patterns such as `video/*`.
    pub fn file(name: impl Into<Cow<'static, str>>, accept: impl Into<Cow<'static, str>>) -> Self {
        Self::new(
            name,
            FieldKind::File { options: FileOptions { accept: Some(accept.into()) }, fields: Vec::new() },
        )
    }

    pub fn reference<I, S>(name: impl Into<Cow<'static, str>>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self::new(name, FieldKind::Reference { to: to.into_iter().map(Into::into).collect() })
    }

    pub fn array(name: impl Into<Cow<'static, str>>, of: impl IntoIterator<Item = ArrayMember>) -> Self {
        Self::new(name, FieldKind::Array { of: of.into_iter().collect() })
    }

    /// Rich text: an array of a single block member.
    pub fn rich_text(name: impl Into<Cow<'static, str>>, block: BlockConfig) -> Self {
        Self::array(name, [ArrayMember::block(block)])
    }

    pub fn object(name: impl Into<Cow<'static, str>>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self::new(name, FieldKind::Object { fields: fields.into_iter().collect(), preview: None })
    }

    pub fn title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn group(mut self, group: impl Into<Cow<'static, str>>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn fieldset(mut self, fieldset: impl Into<Cow<'static, str>>) -> Self {
        self.fieldset = Some(fieldset.into());
        self
    }

    pub fn hidden(mut self, hidden: Hidden) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn rules(mut self, rules: Rule) -> Self {
        self.rules = rules;
        self
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(Initial::Value(value.into()));
        self
    }

    /// The field starts out as the creation timestamp.
    pub fn initial_now(mut self) -> Self {
        self.initial = Some(Initial::Now);
        self
    }

    /// Restricts a string field to a list of values.
    pub fn list<I, T, V>(mut self, layout: ListLayout, values: I) -> Self
    where
        I: IntoIterator<Item = (T, V)>,
        T: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        if let FieldKind::String { options } = &mut self.kind {
            let list =
                values.into_iter().map(|(title, value)| ListOption::new(title, value)).collect();
            *options = Some(StringOptions { list, layout: Some(layout) });
        }
        self
    }

    /// Enables the hotspot editor on an image field.
    pub fn hotspot(mut self) -> Self {
        if let FieldKind::Image { options, .. } = &mut self.kind {
            options.hotspot = true;
        }
        self
    }

    /// Adds metadata fields (alt text, caption) to an image or file field.
    pub fn with_fields(mut self, extra: impl IntoIterator<Item = Field>) -> Self {
        if let FieldKind::Image { fields, .. } | FieldKind::File { fields, .. } = &mut self.kind {
            fields.extend(extra);
        }
        self
    }

    /// Sets the editor preview of an object field.
    pub fn object_preview(mut self, value: Preview) -> Self {
        if let FieldKind::Object { preview, .. } = &mut self.kind {
            *preview = Some(value);
        }
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.is_required()
    }
}

/// The type of a field and its type-specific options.
#[derive(Debug, Clone, Serialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldKind {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<StringOptions>,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        rows: Option<u8>,
    },
    Boolean,
    Number,
    Datetime,
    Url,
    Slug {
        options: SlugOptions,
    },
    Image {
        options: ImageOptions,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Field>,
    },
    File {
        options: FileOptions,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Field>,
    },
    Reference {
        #[serde(serialize_with = "serialize_targets")]
        to: Vec<Cow<'static, str>>,
    },
    Array {
        of: Vec<ArrayMember>,
    },
    Object {
        fields: Vec<Field>,
        #[serde(skip_serializing_if = "Option::is_none")]
        preview: Option<Preview>,
    },
    Block(BlockConfig),
}

impl FieldKind {
    /// The platform type name (`"string"`, `"reference"`, ...).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    /// Nested fields of objects, images and files.
    #[must_use]
    pub fn nested_fields(&self) -> Option<&[Field]> {
        match self {
            Self::Object { fields, .. } | Self::Image { fields, .. } | Self::File { fields, .. } => {
                Some(fields)
            },
            _ => None,
        }
    }
}

fn serialize_targets<S>(to: &[Cow<'static, str>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[derive(Serialize)]
    struct Target<'a> {
        #[serde(rename = "type")]
        name: &'a str,
    }
    serializer.collect_seq(to.iter().map(|name| Target { name }))
}

/// Options of a `string` field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StringOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<ListOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ListLayout>,
}

impl StringOptions {
    /// The values a listed string may take.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|o| o.value.as_ref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListOption {
    pub title: Cow<'static, str>,
    pub value: Cow<'static, str>,
}

impl ListOption {
    pub fn new(title: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        Self { title: title.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListLayout {
    Radio,
    Dropdown,
}

/// Options of a `slug` field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl SlugOptions {
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length.unwrap_or(DEFAULT_SLUG_MAX_LENGTH)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImageOptions {
    pub hotspot: bool,
}

/// Options of a `file` field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileOptions {
    /// Comma separated MIME patterns, e.g. `video/*` or `image/png,image/jpeg`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<Cow<'static, str>>,
}

impl FileOptions {
    /// Whether a MIME type matches the accept patterns. No patterns accept everything.
    #[must_use]
    pub fn accepts(&self, mime: &str) -> bool {
        let Some(accept) = &self.accept else { return true };
        let mime = mime.trim().to_ascii_lowercase();
        accept.split(',').map(str::trim).filter(|p| !p.is_empty()).any(|pattern| {
            let pattern = pattern.to_ascii_lowercase();
            match pattern.strip_suffix("/*") {
                Some(major) => mime.split_once('/').is_some_and(|(m, minor)| m == major && !minor.is_empty()),
                None => pattern == "*" || pattern == mime,
            }
        })
    }
}

/// One allowed item type of an array field.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct ArrayMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Cow<'static, str>>,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(rename = "validation", skip_serializing_if = "rule_is_empty")]
    pub rules: Rule,
}

impl ArrayMember {
    pub fn of(kind: FieldKind) -> Self {
        Self { name: None, title: None, kind, rules: Rule::new() }
    }

    pub fn string() -> Self {
        Self::of(FieldKind::String { options: None })
    }

    pub fn block(config: BlockConfig) -> Self {
        Self::of(FieldKind::Block(config))
    }

    pub fn reference<I, S>(to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self::of(FieldKind::Reference { to: to.into_iter().map(Into::into).collect() })
    }

    /// An image item with optional hotspot and metadata fields.
    pub fn image(hotspot: bool, fields: impl IntoIterator<Item = Field>) -> Self {
        Self::of(FieldKind::Image {
            options: ImageOptions { hotspot },
            fields: fields.into_iter().collect(),
        })
    }

    /// An anonymous object item.
    pub fn object(fields: impl IntoIterator<Item = Field>, preview: Option<Preview>) -> Self {
        Self::of(FieldKind::Object { fields: fields.into_iter().collect(), preview })
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn rules(mut self, rules: Rule) -> Self {
        self.rules = rules;
        self
    }

    /// The `_type` items of this member carry.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.type_name())
    }
}
