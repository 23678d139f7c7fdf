//! Document validation.
//!
//! Every check of every field runs; markers accumulate and nothing short-circuits.
//! Besides the declared [`Rule`]s, each value is checked against its field type
//! (shape, slug format, block styles and marks, array member types).
mod marker;
pub mod uri;

pub use marker::{Marker, Path, ValidationReport};

use crate::model::{ArrayMember, BlockConfig, Field, FieldKind, SlugOptions};
use crate::rules::{Check, Constraint, Level, Rule};
use crate::slug;
use crate::value::{self, is_empty, json_type};
use atria_domain::constants::{REFERENCE, SPAN, TYPE_KEY};
use atria_kernel::ids::DocumentId;
use serde_json::{Map, Value};
use std::borrow::Cow;
use uri::UriRule;

const REQUIRED: &str = "Required";
const DUPLICATE: &str = "Can't be a duplicate";

/// Walks one document and collects markers.
pub(crate) struct Validator<'a> {
    document_id: Option<&'a str>,
    markers: Vec<Marker>,
}

impl<'a> Validator<'a> {
    pub(crate) const fn new(document_id: Option<&'a str>) -> Self {
        Self { document_id, markers: Vec::new() }
    }

    pub(crate) fn finish(self) -> Vec<Marker> {
        self.markers
    }

    /// Validates the fields of one object. A missing key is checked like `null`.
    pub(crate) fn fields(&mut self, fields: &[Field], object: &Map<String, Value>, path: &Path) {
        for field in fields {
            let field_path = path.field(field.name.clone());
            let value = object.get(&*field.name);
            self.rules(&field.kind, &field.rules, value, object, &field_path);
            if let Some(value) = value.filter(|v| !v.is_null()) {
                self.kind(&field.kind, value, &field_path);
            }
        }
    }

    fn push(&mut self, path: &Path, level: Level, message: impl Into<Cow<'static, str>>) {
        self.markers.push(Marker { path: path.clone(), level, message: message.into() });
    }

    fn fail(&mut self, check: &Check, path: &Path, default: impl Into<Cow<'static, str>>) {
        let message = check.message.clone().unwrap_or_else(|| default.into());
        self.push(path, check.level, message);
    }

    fn rules(
        &mut self,
        kind: &FieldKind,
        rules: &Rule,
        value: Option<&Value>,
        parent: &Map<String, Value>,
        path: &Path,
    ) {
        for check in rules.checks() {
            self.check(check, kind, value, parent, path);
        }
        for check in inferred_checks(kind, rules) {
            self.check(&check, kind, value, parent, path);
        }
    }

    fn check(
        &mut self,
        check: &Check,
        kind: &FieldKind,
        value: Option<&Value>,
        parent: &Map<String, Value>,
        path: &Path,
    ) {
        let present = value.filter(|v| !is_absent(kind, v));

        match &check.constraint {
            Constraint::Required => {
                if present.is_none() {
                    self.fail(check, path, REQUIRED);
                }
            },
            Constraint::RequiredWhen(sibling) => {
                if present.is_none() && value::truthy(parent.get(&**sibling)) {
                    self.fail(check, path, format!("Required when '{sibling}' is set"));
                }
            },
            // Bounds also apply to present but empty values: `[]` still has length 0.
            constraint @ (Constraint::Min(_) | Constraint::Max(_)) => {
                if let Some(value) = value.filter(|v| !v.is_null() && expected_type(kind, v).is_none()) {
                    self.constrain(check, constraint, value, path);
                }
            },
            // Values of the wrong shape are reported by the type check instead.
            constraint => {
                if let Some(value) = present.filter(|v| expected_type(kind, v).is_none()) {
                    self.constrain(check, constraint, value, path);
                }
            },
        }
    }

    fn constrain(&mut self, check: &Check, constraint: &Constraint, value: &Value, path: &Path) {
        match (constraint, value) {
            (Constraint::Min(limit), value) => {
                if measure(value).is_some_and(|size| size < as_f64(*limit)) {
                    self.fail(check, path, bound_message(value, "at least", *limit));
                }
            },
            (Constraint::Max(limit), value) => {
                if measure(value).is_some_and(|size| size > as_f64(*limit)) {
                    self.fail(check, path, bound_message(value, "at most", *limit));
                }
            },
            (Constraint::Unique, Value::Array(items)) => {
                let mut seen: Vec<Value> = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let identity = identity(item);
                    if seen.contains(&identity) {
                        self.fail(check, &path.item(item, index), DUPLICATE);
                    } else {
                        seen.push(identity);
                    }
                }
            },
            (Constraint::Uri(rule), Value::String(s)) => self.uri(check, rule, s, path),
            (Constraint::OneOf(allowed), value) => {
                if !allowed.contains(value) {
                    self.fail(check, path, "Value did not match any allowed values");
                }
            },
            (Constraint::NotSelf, Value::Array(items)) => {
                let Some(id) = self.document_id else { return };
                for (index, item) in items.iter().enumerate() {
                    if value::reference_id(item).is_some_and(|r| DocumentId::same_document(r, id)) {
                        self.fail(check, &path.item(item, index), "A document cannot reference itself");
                    }
                }
            },
            _ => {},
        }
    }

    fn uri(&mut self, check: &Check, rule: &UriRule, value: &str, path: &Path) {
        if let Err(violation) = rule.check(value) {
            self.fail(check, path, violation.message());
        }
    }

    /// Checks a present value against its type and descends into nested values.
    fn kind(&mut self, kind: &FieldKind, value: &Value, path: &Path) {
        if let Some(expected) = expected_type(kind, value) {
            self.push(
                path,
                Level::Error,
                format!("Expected type \"{expected}\", got \"{}\"", json_type(value)),
            );
            return;
        }

        match kind {
            FieldKind::Datetime => {
                let valid = value
                    .as_str()
                    .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok());
                if !valid {
                    self.push(path, Level::Error, "Invalid date-time, expected RFC 3339");
                }
            },
            FieldKind::Slug { options } => self.slug(options, value, path),
            FieldKind::Reference { .. } => {
                if !is_empty(value) && value::reference_id(value).is_none() {
                    self.push(path, Level::Error, "Reference is missing its target id");
                }
            },
            FieldKind::Image { fields, .. } | FieldKind::File { fields, .. }
            | FieldKind::Object { fields, .. } => {
                if let Some(object) = value.as_object().filter(|_| !is_empty(value)) {
                    self.fields(fields, object, path);
                }
            },
            FieldKind::Array { of } => {
                if let Some(items) = value.as_array() {
                    self.items(of, items, path);
                }
            },
            FieldKind::Block(config) => self.block(config, value, path),
            FieldKind::String { .. }
            | FieldKind::Text { .. }
            | FieldKind::Boolean
            | FieldKind::Number
            | FieldKind::Url => {},
        }
    }

    fn slug(&mut self, options: &SlugOptions, value: &Value, path: &Path) {
        let Some(current) = value.get("current") else { return };
        let Some(current) = current.as_str() else {
            self.push(
                &path.field("current"),
                Level::Error,
                format!("Expected type \"String\", got \"{}\"", json_type(current)),
            );
            return;
        };
        let max = options.max_length();
        if current.chars().count() > max {
            self.push(path, Level::Error, format!("Slug must be at most {max} characters long"));
        }
        if !slug::is_url_safe(current) {
            self.push(path, Level::Error, "Slug may only contain a-z, 0-9, '-', '_', '.' and '~'");
        }
    }

    fn items(&mut self, members: &[ArrayMember], items: &[Value], path: &Path) {
        for (index, item) in items.iter().enumerate() {
            let item_path = path.item(item, index);
            match member_for(members, item) {
                Some(member) => {
                    self.rules(&member.kind, &member.rules, Some(item), &Map::new(), &item_path);
                    self.kind(&member.kind, item, &item_path);
                },
                None => {
                    let found = item.get(TYPE_KEY).and_then(Value::as_str).unwrap_or_else(|| json_type(item));
                    self.push(
                        &item_path,
                        Level::Error,
                        format!("Value of type \"{found}\" is not allowed in this array"),
                    );
                },
            }
        }
    }

    fn block(&mut self, config: &BlockConfig, block: &Value, path: &Path) {
        let Some(block) = block.as_object() else { return };

        if let Some(style) = block.get("style").and_then(Value::as_str) {
            if !config.styles.allows(style) {
                self.push(&path.field("style"), Level::Error, format!("Style \"{style}\" is not allowed"));
            }
        }
        if let Some(list) = block.get("listItem").and_then(Value::as_str) {
            if !config.lists.allows(list) {
                self.push(&path.field("listItem"), Level::Error, format!("List type \"{list}\" is not allowed"));
            }
        }

        let mut def_keys = Vec::new();
        if let Some(defs) = block.get("markDefs").and_then(Value::as_array) {
            let defs_path = path.field("markDefs");
            for (index, def) in defs.iter().enumerate() {
                let def_path = defs_path.item(def, index);
                let name = def.get(TYPE_KEY).and_then(Value::as_str).unwrap_or_default();
                match (config.get_annotation(name), def.as_object()) {
                    (Some(annotation), Some(object)) => {
                        if let Some(key) = value::array_key(def) {
                            def_keys.push(key);
                        }
                        self.fields(&annotation.fields, object, &def_path);
                    },
                    _ => self.push(&def_path, Level::Error, format!("Annotation \"{name}\" is not allowed")),
                }
            }
        }

        let Some(children) = block.get("children").and_then(Value::as_array) else { return };
        let children_path = path.field("children");
        for (index, child) in children.iter().enumerate() {
            let child_path = children_path.item(child, index);
            if child.get(TYPE_KEY).and_then(Value::as_str).is_some_and(|t| t != SPAN) {
                self.push(&child_path, Level::Error, "Inline objects are not allowed in this block");
                continue;
            }
            let marks = child.get("marks").and_then(Value::as_array).into_iter().flatten();
            for mark in marks.filter_map(Value::as_str) {
                if !config.marks.decorators.allows(mark) && !def_keys.contains(&mark) {
                    self.push(&child_path, Level::Error, format!("Mark \"{mark}\" is not allowed"));
                }
            }
        }
    }
}

/// Checks implied by the field type when the rule does not state them.
fn inferred_checks(kind: &FieldKind, rules: &Rule) -> Vec<Check> {
    match kind {
        FieldKind::String { options: Some(options) }
            if !options.list.is_empty() && !rules.has(|c| matches!(c, Constraint::OneOf(_))) =>
        {
            let allowed = options.values().map(|v| Value::String(v.to_owned())).collect();
            vec![Check::inferred(Constraint::OneOf(allowed))]
        },
        FieldKind::Url if !rules.has(|c| matches!(c, Constraint::Uri(_))) => {
            vec![Check::inferred(Constraint::Uri(UriRule::default()))]
        },
        _ => Vec::new(),
    }
}

/// Whether a value counts as missing for presence checks.
fn is_absent(kind: &FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::Slug { .. } => value.get("current").is_none_or(is_empty),
        FieldKind::Reference { .. } => value::reference_id(value).is_none(),
        FieldKind::Image { .. } | FieldKind::File { .. } if value.is_object() => {
            value.get("asset").is_none_or(is_empty)
        },
        _ => is_empty(value),
    }
}

/// The JSON type a value should have had, when it has the wrong one.
fn expected_type(kind: &FieldKind, value: &Value) -> Option<&'static str> {
    let ok = match kind {
        FieldKind::String { .. } | FieldKind::Text { .. } | FieldKind::Url | FieldKind::Datetime => {
            value.is_string()
        },
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::Number => value.is_number(),
        FieldKind::Array { .. } => value.is_array(),
        FieldKind::Slug { .. }
        | FieldKind::Image { .. }
        | FieldKind::File { .. }
        | FieldKind::Reference { .. }
        | FieldKind::Object { .. }
        | FieldKind::Block(_) => value.is_object(),
    };
    if ok {
        return None;
    }
    Some(match kind {
        FieldKind::String { .. } | FieldKind::Text { .. } | FieldKind::Url | FieldKind::Datetime => {
            "String"
        },
        FieldKind::Boolean => "Boolean",
        FieldKind::Number => "Number",
        FieldKind::Array { .. } => "Array",
        _ => "Object",
    })
}

/// The array member that describes `item`.
///
/// Objects are matched by `_type`; untyped objects fall back to the first anonymous
/// object member; scalars match the member of their JSON type.
fn member_for<'m>(members: &'m [ArrayMember], item: &Value) -> Option<&'m ArrayMember> {
    match item {
        Value::Object(object) => match object.get(TYPE_KEY).and_then(Value::as_str) {
            Some(name) => members.iter().find(|m| {
                m.type_name() == name
                    || (name == REFERENCE && matches!(m.kind, FieldKind::Reference { .. }))
            }),
            None => members
                .iter()
                .find(|m| m.name.is_none() && matches!(m.kind, FieldKind::Object { .. })),
        },
        Value::String(_) => members.iter().find(|m| {
            matches!(
                m.kind,
                FieldKind::String { .. } | FieldKind::Text { .. } | FieldKind::Url | FieldKind::Datetime
            )
        }),
        Value::Number(_) => members.iter().find(|m| matches!(m.kind, FieldKind::Number)),
        Value::Bool(_) => members.iter().find(|m| matches!(m.kind, FieldKind::Boolean)),
        Value::Null | Value::Array(_) => None,
    }
}

/// Size used by min/max: characters, items or the number itself.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(as_f64(s.chars().count())),
        Value::Array(items) => Some(as_f64(items.len())),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
const fn as_f64(n: usize) -> f64 {
    n as f64
}

fn bound_message(value: &Value, bound: &str, limit: usize) -> String {
    match value {
        Value::String(_) => format!("Must be {bound} {limit} characters long"),
        Value::Array(_) => format!("Must have {bound} {limit} items"),
        _ => format!("Must be {bound} {limit}"),
    }
}

/// What two array items are compared by: the target of a reference, otherwise the
/// item without its `_key`.
fn identity(item: &Value) -> Value {
    if let Some(target) = value::reference_id(item) {
        return Value::String(target.to_owned());
    }
    match item {
        Value::Object(object) => Value::Object(
            object.iter().filter(|(k, _)| *k != "_key").map(|(k, v)| (k.clone(), v.clone())).collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use serde_json::json;

    fn run(fields: &[Field], doc: &Value) -> Vec<Marker> {
        let mut validator = Validator::new(doc.get("_id").and_then(Value::as_str));
        validator.fields(fields, doc.as_object().unwrap(), &Path::root());
        validator.finish()
    }

    fn messages(markers: &[Marker]) -> Vec<String> {
        markers.iter().map(|m| format!("{}|{}|{}", m.path, m.level, m.message)).collect()
    }

    #[test]
    fn required_treats_empty_values_as_missing() {
        let fields = [
            Field::string("title").rules(Rule::new().required()),
            Field::slug("slug", "title", 96).rules(Rule::new().required()),
        ];
        let markers = run(&fields, &json!({ "title": "", "slug": { "_type": "slug", "current": "" } }));
        assert_eq!(messages(&markers), ["title|error|Required", "slug|error|Required"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let fields =
            [Field::array("tags", [ArrayMember::string()]).rules(Rule::new().max(2).warning("Too many"))];
        assert!(run(&fields, &json!({ "tags": ["a", "b"] })).is_empty());
        let markers = run(&fields, &json!({ "tags": ["a", "b", "c"] }));
        assert_eq!(messages(&markers), ["tags|warning|Too many"]);
    }

    #[test]
    fn minimum_applies_to_empty_arrays_but_not_missing_ones() {
        let fields =
            [Field::array("highlights", [ArrayMember::string()]).rules(Rule::new().min(1).error("Add one"))];
        assert!(run(&fields, &json!({})).is_empty());
        assert!(run(&fields, &json!({ "highlights": null })).is_empty());
        let markers = run(&fields, &json!({ "highlights": [] }));
        assert_eq!(messages(&markers), ["highlights|error|Add one"]);
    }

    #[test]
    fn string_length_counts_characters() {
        let fields = [Field::string("metaTitle").rules(Rule::new().max(5))];
        assert!(run(&fields, &json!({ "metaTitle": "₹₹₹₹₹" })).is_empty());
        let markers = run(&fields, &json!({ "metaTitle": "₹₹₹₹₹₹" }));
        assert_eq!(messages(&markers), ["metaTitle|error|Must be at most 5 characters long"]);
    }

    #[test]
    fn type_mismatch_is_reported_once() {
        let fields = [Field::string("title").rules(Rule::new().max(3))];
        let markers = run(&fields, &json!({ "title": 42 }));
        assert_eq!(messages(&markers), [r#"title|error|Expected type "String", got "Number""#]);
    }

    #[test]
    fn unique_compares_references_by_target() {
        let fields = [Field::array("tags", [ArrayMember::reference(["tag"])]).rules(Rule::new().unique())];
        let doc = json!({ "tags": [
            { "_key": "a", "_type": "reference", "_ref": "tag-1" },
            { "_key": "b", "_type": "reference", "_ref": "tag-2" },
            { "_key": "c", "_type": "reference", "_ref": "tag-1" }
        ]});
        let markers = run(&fields, &doc);
        assert_eq!(messages(&markers), [r#"tags[_key=="c"]|error|Can't be a duplicate"#]);
    }

    #[test]
    fn inferred_list_and_url_checks() {
        let fields = [
            Field::string("competition").list(crate::model::ListLayout::Radio, [("Low", "low"), ("High", "high")]),
            Field::url("website"),
        ];
        let markers = run(&fields, &json!({ "competition": "extreme", "website": "ftp://example.com" }));
        assert_eq!(
            messages(&markers),
            [
                "competition|error|Value did not match any allowed values",
                "website|error|Does not match allowed protocols/schemes"
            ]
        );
    }

    #[test]
    fn required_when_sibling_is_truthy() {
        let fields = [
            Field::string("ctaButtonText"),
            Field::url("ctaButtonLink").rules(Rule::new().required_when("ctaButtonText")),
        ];
        assert!(run(&fields, &json!({})).is_empty());
        let markers = run(&fields, &json!({ "ctaButtonText": "Call Now" }));
        assert_eq!(messages(&markers), ["ctaButtonLink|error|Required when 'ctaButtonText' is set"]);
    }

    #[test]
    fn nested_fields_only_checked_when_parent_has_value() {
        let fields = [Field::image("featuredImage").with_fields([Field::string("alt").rules(Rule::new().required())])];
        assert!(run(&fields, &json!({})).is_empty());
        assert!(run(&fields, &json!({ "featuredImage": { "_type": "image" } })).is_empty());
        let markers = run(&fields, &json!({ "featuredImage": { "_type": "image", "asset": { "_ref": "image-1" } } }));
        assert_eq!(messages(&markers), ["featuredImage.alt|error|Required"]);
    }

    #[test]
    fn block_styles_marks_and_annotations() {
        let block = BlockConfig::new(
            atria_domain::marks::BlockStyles::EDITORIAL,
            atria_domain::marks::ListStyles::BULLET,
            atria_domain::marks::Decorators::EDITORIAL,
        )
        .annotation(crate::model::Annotation::new(
            "link",
            [Field::url("href").rules(Rule::new().uri(UriRule::new().allow_relative(true)))],
        ));
        let fields = [Field::rich_text("body", block)];
        let doc = json!({ "body": [{
            "_type": "block", "_key": "b1", "style": "h1", "listItem": "number",
            "markDefs": [
                { "_type": "link", "_key": "l1", "href": "javascript:alert(1)" },
                { "_type": "footnote", "_key": "f1" }
            ],
            "children": [
                { "_type": "span", "_key": "s1", "text": "Solar", "marks": ["strong", "l1", "code", "f1"] },
                { "_type": "image", "_key": "i1" }
            ]
        }]});

        let markers = run(&fields, &doc);
        assert_eq!(
            messages(&markers),
            [
                r#"body[_key=="b1"].style|error|Style "h1" is not allowed"#,
                r#"body[_key=="b1"].listItem|error|List type "number" is not allowed"#,
                r#"body[_key=="b1"].markDefs[_key=="l1"].href|error|Does not match allowed protocols/schemes"#,
                r#"body[_key=="b1"].markDefs[_key=="f1"]|error|Annotation "footnote" is not allowed"#,
                r#"body[_key=="b1"].children[_key=="s1"]|error|Mark "code" is not allowed"#,
                r#"body[_key=="b1"].children[_key=="s1"]|error|Mark "f1" is not allowed"#,
                r#"body[_key=="b1"].children[_key=="i1"]|error|Inline objects are not allowed in this block"#,
            ]
        );
    }

    #[test]
    fn unknown_array_member_types() {
        let fields = [Field::array("tags", [ArrayMember::reference(["tag"])])];
        let markers = run(&fields, &json!({ "tags": [{ "_type": "category", "_key": "x" }, 7] }));
        assert_eq!(
            messages(&markers),
            [
                r#"tags[_key=="x"]|error|Value of type "category" is not allowed in this array"#,
                r#"tags[1]|error|Value of type "Number" is not allowed in this array"#,
            ]
        );
    }

    #[test]
    fn self_reference_is_flagged_for_drafts_too() {
        let fields = [Field::array("relatedBlogs", [ArrayMember::reference(["blog"])])
            .rules(Rule::new().not_self().warning("A blog should not list itself as related"))];
        let doc = json!({ "_id": "drafts.blog-1", "relatedBlogs": [
            { "_key": "a", "_type": "reference", "_ref": "blog-1" },
            { "_key": "b", "_type": "reference", "_ref": "blog-2" }
        ]});
        let markers = run(&fields, &doc);
        assert_eq!(messages(&markers), [r#"relatedBlogs[_key=="a"]|warning|A blog should not list itself as related"#]);
    }

    #[test]
    fn datetimes_must_be_rfc3339() {
        let fields = [Field::datetime("publishedAt")];
        assert!(run(&fields, &json!({ "publishedAt": "2026-03-01T09:30:00.000Z" })).is_empty());
        let markers = run(&fields, &json!({ "publishedAt": "March 1st" }));
        assert_eq!(messages(&markers), ["publishedAt|error|Invalid date-time, expected RFC 3339"]);
    }
}
