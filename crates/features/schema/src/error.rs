use std::borrow::Cow;

/// Errors raised by the registry.
///
/// `Configuration` is fatal and only produced by [`crate::Registry::register`];
/// the other variants describe a document the registry cannot interpret at all.
/// Field-level problems are never errors: they are reported as markers.
#[atria_derive::atria_error]
pub enum SchemaError {
    #[error("Invalid schema for '{document_type}'{}: {issue}", format_context(.context))]
    Configuration {
        document_type: Cow<'static, str>,
        issue: ConfigIssue,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown document type{}: {message}", format_context(.context))]
    UnknownType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid document{}: {message}", format_context(.context))]
    InvalidDocument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Serde serialization error{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

/// What is wrong with a schema definition. Field locations are dotted paths
/// from the document root (`hero.highlights.logo`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("document type is registered twice")]
    DuplicateType,

    #[error("field '{field}' is declared twice")]
    DuplicateField { field: String },

    #[error("field '{field}' references undeclared type '{target}'")]
    UnknownReferenceTarget { field: String, target: String },

    #[error("reference field '{field}' has no target types")]
    EmptyReferenceTargets { field: String },

    #[error("slug field '{field}' has no source field")]
    MissingSlugSource { field: String },

    #[error("slug field '{field}' is sourced from '{from}', which is not a sibling field")]
    UnknownSlugSource { field: String, from: String },

    #[error("field '{field}' is assigned to undeclared group '{group}'")]
    UnknownGroup { field: String, group: String },

    #[error("field '{field}' is assigned to undeclared fieldset '{fieldset}'")]
    UnknownFieldset { field: String, fieldset: String },

    #[error("field '{field}' is hidden by missing sibling toggle '{toggle}'")]
    UnknownVisibilityToggle { field: String, toggle: String },

    #[error("groups '{first}' and '{second}' are both marked as default")]
    MultipleDefaultGroups { first: String, second: String },

    #[error("array field '{field}' declares no member types")]
    EmptyArrayMembers { field: String },

    #[error("preview selects unknown field '{path}'")]
    UnknownPreviewField { path: String },
}
