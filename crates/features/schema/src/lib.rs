//! Content schema registry.
//!
//! Document types are declared as trees of [`Field`]s carrying validation [`Rule`]s,
//! visibility predicates, previews and initial values. A [`Registry`] checks the
//! declarations once and then validates JSON documents against them:
//!
//! ```rust
//! use atria_schema::{DocumentType, Field, Registry, Rule};
//! use serde_json::json;
//!
//! let tag = DocumentType::new("tag", "Tag")
//!     .field(Field::string("title").rules(Rule::new().required()));
//! let registry = Registry::register([tag])?;
//!
//! let report = registry.validate(&json!({ "_id": "t1", "_type": "tag" }))?;
//! assert!(!report.is_valid());
//! assert_eq!(report.markers()[0].path.to_string(), "title");
//! # Ok::<(), atria_schema::SchemaError>(())
//! ```
pub mod error;
pub mod initial;
pub mod model;
pub mod preview;
pub mod registry;
pub mod rules;
pub mod slug;
pub mod validation;
pub mod value;
pub mod visibility;

pub use error::{ConfigIssue, SchemaError, SchemaErrorExt};
pub use initial::Initial;
pub use model::{
    Annotation, ArrayMember, BlockConfig, DocumentType, Field, FieldKind, FileOptions, Fieldset,
    Group, ImageOptions, ListLayout, ListOption, SlugOptions, StringOptions,
};
pub use preview::{Preview, PreviewValues};
pub use registry::Registry;
pub use rules::{Level, Rule};
pub use validation::uri::UriRule;
pub use validation::{Marker, Path, ValidationReport};
pub use visibility::{Hidden, VisibilityReport};
