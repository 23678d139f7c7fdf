use crate::rules::Level;
use crate::value;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(Cow<'static, str>),
    Key(String),
    Index(usize),
}

/// Location of a value inside a document, displayed as
/// `hero.highlights[_key=="k1"].logo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn field(&self, name: impl Into<Cow<'static, str>>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    /// An array item, addressed by its `_key` when it has one.
    #[must_use]
    pub fn item(&self, item: &Value, index: usize) -> Self {
        match value::array_key(item) {
            Some(key) => self.with(Segment::Key(key.to_owned())),
            None => self.with(Segment::Index(index)),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Key(key) => write!(f, "[_key==\"{key}\"]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub path: Path,
    pub level: Level,
    pub message: Cow<'static, str>,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.path, self.message)
    }
}

/// All markers produced for one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub document_type: String,
    markers: Vec<Marker>,
}

impl ValidationReport {
    pub(crate) fn new(
        document_id: Option<String>,
        document_type: String,
        markers: Vec<Marker>,
    ) -> Self {
        Self { document_id, document_type, markers }
    }

    /// No blocking markers: the document may be saved.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.markers.iter().any(|m| m.level.is_blocking())
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn errors(&self) -> impl Iterator<Item = &Marker> {
        self.at_level(Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Marker> {
        self.at_level(Level::Warning)
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.level == level)
    }

    /// Markers whose displayed path equals `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers.iter().filter(move |m| m.path.to_string() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_render_keys_and_indices() {
        let path = Path::root()
            .field("hero")
            .field("highlights")
            .item(&json!({ "_key": "k1" }), 0)
            .field("logo");
        assert_eq!(path.to_string(), r#"hero.highlights[_key=="k1"].logo"#);

        let unkeyed = Path::root().field("blogHighlights").item(&json!("Save more"), 2);
        assert_eq!(unkeyed.to_string(), "blogHighlights[2]");
        assert_eq!(serde_json::to_value(&unkeyed).unwrap(), json!("blogHighlights[2]"));
        assert!(Path::root().is_root());
    }

    #[test]
    fn report_validity_ignores_warnings() {
        let warning = Marker {
            path: Path::root().field("relatedBlogs"),
            level: Level::Warning,
            message: "Keep related blogs to 4 or fewer for best UX".into(),
        };
        let report = ValidationReport::new(None, "blog".to_owned(), vec![warning.clone()]);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(
            warning.to_string(),
            "[warning] relatedBlogs: Keep related blogs to 4 or fewer for best UX"
        );
    }
}
