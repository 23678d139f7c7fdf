//! Editor list previews.

use crate::value;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;

const UNTITLED: &str = "Untitled";

/// Turns the selected values into a preview.
pub type PrepareFn = fn(&Map<String, Value>) -> PreviewValues;

/// Which values describe an item in lists: `title`, `subtitle`, `media` and any
/// extra keys a custom `prepare` reads.
#[derive(Debug, Clone)]
#[must_use]
pub struct Preview {
    select: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    prepare: Option<PrepareFn>,
}

/// The resolved preview of one document or item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewValues {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Value>,
}

impl Preview {
    pub fn new() -> Self {
        Self { select: Vec::new(), prepare: None }
    }

    /// Selects `path` (dotted for nested values) under `key`.
    pub fn select(mut self, key: impl Into<Cow<'static, str>>, path: impl Into<Cow<'static, str>>) -> Self {
        self.select.push((key.into(), path.into()));
        self
    }

    pub fn title(self, path: impl Into<Cow<'static, str>>) -> Self {
        self.select("title", path)
    }

    pub fn subtitle(self, path: impl Into<Cow<'static, str>>) -> Self {
        self.select("subtitle", path)
    }

    pub fn media(self, path: impl Into<Cow<'static, str>>) -> Self {
        self.select("media", path)
    }

    pub fn prepare(mut self, prepare: PrepareFn) -> Self {
        self.prepare = Some(prepare);
        self
    }

    /// Selected field paths, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.select.iter().map(|(_, path)| path.as_ref())
    }

    /// Picks the selected values out of `object`; missing paths are left out.
    #[must_use]
    pub fn selection(&self, object: &Map<String, Value>) -> Map<String, Value> {
        self.select
            .iter()
            .filter_map(|(key, path)| Some((key.to_string(), value::lookup(object, path)?.clone())))
            .collect()
    }

    /// Resolves the preview for `object`.
    #[must_use]
    pub fn resolve(&self, object: &Map<String, Value>) -> PreviewValues {
        let selection = self.selection(object);
        match self.prepare {
            Some(prepare) => prepare(&selection),
            None => PreviewValues::from_selection(&selection),
        }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewValues {
    /// The default rendering: flattened title (or "Untitled"), flattened subtitle and
    /// the media value as is.
    #[must_use]
    pub fn from_selection(selection: &Map<String, Value>) -> Self {
        Self {
            title: selection.get("title").and_then(value::plain_text).unwrap_or_else(|| UNTITLED.to_owned()),
            subtitle: selection.get("subtitle").and_then(value::plain_text),
            media: selection.get("media").filter(|m| !value::is_empty(m)).cloned(),
        }
    }
}

impl Serialize for Preview {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Shape {
            select: Map<String, Value>,
            #[serde(skip_serializing_if = "std::ops::Not::not")]
            prepare: bool,
        }

        let select =
            self.select.iter().map(|(k, p)| (k.to_string(), Value::String(p.to_string()))).collect();
        Shape { select, prepare: self.prepare.is_some() }.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_preview_flattens_rich_text() {
        let preview = Preview::new().title("text").media("logo");
        let item = json!({
            "_key": "h1",
            "text": [{ "_type": "block", "children": [{ "_type": "span", "text": "50+ Years in Bengaluru" }] }],
            "logo": { "_type": "image", "asset": { "_ref": "image-abc" } }
        });
        let values = preview.resolve(item.as_object().unwrap());
        assert_eq!(values.title, "50+ Years in Bengaluru");
        assert_eq!(values.subtitle, None);
        assert_eq!(values.media.unwrap()["asset"]["_ref"], json!("image-abc"));
    }

    #[test]
    fn missing_title_is_untitled() {
        let preview = Preview::new().title("title").subtitle("metaTitle");
        let values = preview.resolve(json!({ "metaTitle": "Solar subsidy guide" }).as_object().unwrap());
        assert_eq!(values.title, "Untitled");
        assert_eq!(values.subtitle.as_deref(), Some("Solar subsidy guide"));
    }

    #[test]
    fn custom_prepare_sees_extra_keys() {
        fn prepare(selection: &Map<String, Value>) -> PreviewValues {
            PreviewValues {
                title: "fixed".to_owned(),
                subtitle: selection.get("competition").and_then(Value::as_str).map(str::to_owned),
                media: None,
            }
        }
        let preview = Preview::new().select("competition", "competition").prepare(prepare);
        let values = preview.resolve(json!({ "competition": "low" }).as_object().unwrap());
        assert_eq!(values.subtitle.as_deref(), Some("low"));
        assert_eq!(serde_json::to_value(&preview).unwrap(), json!({ "select": { "competition": "competition" }, "prepare": true }));
    }
}
