//! Registration-time checks of schema definitions.

use crate::error::{ConfigIssue, SchemaError};
use crate::model::{ArrayMember, DocumentType, Field, FieldKind};
use crate::preview::Preview;
use fxhash::FxHashSet;

pub(super) fn check_all(types: &[DocumentType]) -> Result<(), SchemaError> {
    let mut names = FxHashSet::default();
    for doc_type in types {
        if !names.insert(&*doc_type.name) {
            return Err(fail(doc_type, ConfigIssue::DuplicateType));
        }
    }

    for doc_type in types {
        Checker::new(doc_type, &names).check().map_err(|issue| fail(doc_type, issue))?;
    }
    Ok(())
}

fn fail(doc_type: &DocumentType, issue: ConfigIssue) -> SchemaError {
    SchemaError::Configuration { document_type: doc_type.name.clone(), issue, context: None }
}

struct Checker<'a> {
    doc_type: &'a DocumentType,
    type_names: &'a FxHashSet<&'a str>,
    groups: FxHashSet<&'a str>,
    fieldsets: FxHashSet<&'a str>,
}

/// Field names inside one object, for sibling lookups.
type Siblings<'a> = FxHashSet<&'a str>;

impl<'a> Checker<'a> {
    fn new(doc_type: &'a DocumentType, type_names: &'a FxHashSet<&'a str>) -> Self {
        Self {
            doc_type,
            type_names,
            groups: doc_type.groups.iter().map(|g| &*g.name).collect(),
            fieldsets: doc_type.fieldsets.iter().map(|f| &*f.name).collect(),
        }
    }

    fn check(&self) -> Result<(), ConfigIssue> {
        let mut defaults = self.doc_type.groups.iter().filter(|g| g.default);
        if let (Some(first), Some(second)) = (defaults.next(), defaults.next()) {
            return Err(ConfigIssue::MultipleDefaultGroups {
                first: first.name.to_string(),
                second: second.name.to_string(),
            });
        }

        self.fields(&self.doc_type.fields, "", true)?;
        if let Some(preview) = &self.doc_type.preview {
            preview_paths(preview, &self.doc_type.fields, "")?;
        }
        Ok(())
    }

    /// Checks one object's fields; `top` marks document-level fields, the only ones that
    /// may join groups and fieldsets.
    fn fields(&self, fields: &[Field], prefix: &str, top: bool) -> Result<(), ConfigIssue> {
        let mut siblings = Siblings::default();
        for field in fields {
            if !siblings.insert(&*field.name) {
                return Err(ConfigIssue::DuplicateField { field: join(prefix, &field.name) });
            }
        }

        for field in fields {
            let path = join(prefix, &field.name);
            for group in &field.groups {
                if !top || !self.groups.contains(&**group) {
                    return Err(ConfigIssue::UnknownGroup { field: path, group: group.to_string() });
                }
            }
            if let Some(fieldset) = &field.fieldset {
                if !top || !self.fieldsets.contains(&**fieldset) {
                    return Err(ConfigIssue::UnknownFieldset { field: path, fieldset: fieldset.to_string() });
                }
            }
            if let Some(toggle) = field.hidden.toggle() {
                if !siblings.contains(toggle) || toggle == field.name {
                    return Err(ConfigIssue::UnknownVisibilityToggle { field: path, toggle: toggle.to_owned() });
                }
            }
            self.kind(&field.kind, &path, &siblings)?;
        }
        Ok(())
    }

    fn kind(&self, kind: &FieldKind, path: &str, siblings: &Siblings<'_>) -> Result<(), ConfigIssue> {
        match kind {
            FieldKind::Reference { to } => self.targets(to, path),
            FieldKind::Slug { options } => match options.source.as_deref() {
                None => Err(ConfigIssue::MissingSlugSource { field: path.to_owned() }),
                Some(from) if !siblings.contains(from.split('.').next().unwrap_or(from)) => {
                    Err(ConfigIssue::UnknownSlugSource { field: path.to_owned(), from: from.to_owned() })
                },
                Some(_) => Ok(()),
            },
            FieldKind::Array { of } => self.members(of, path),
            FieldKind::Object { fields, preview } => {
                self.fields(fields, path, false)?;
                match preview {
                    Some(preview) => preview_paths(preview, fields, path),
                    None => Ok(()),
                }
            },
            FieldKind::Image { fields, .. } | FieldKind::File { fields, .. } => self.fields(fields, path, false),
            FieldKind::Block(block) => {
                for annotation in &block.marks.annotations {
                    self.fields(&annotation.fields, &join(path, &annotation.name), false)?;
                }
                Ok(())
            },
            FieldKind::String { .. }
            | FieldKind::Text { .. }
            | FieldKind::Boolean
            | FieldKind::Number
            | FieldKind::Datetime
            | FieldKind::Url => Ok(()),
        }
    }

    fn members(&self, members: &[ArrayMember], path: &str) -> Result<(), ConfigIssue> {
        if members.is_empty() {
            return Err(ConfigIssue::EmptyArrayMembers { field: path.to_owned() });
        }
        let no_siblings = Siblings::default();
        for member in members {
            self.kind(&member.kind, path, &no_siblings)?;
        }
        Ok(())
    }

    fn targets(&self, to: &[std::borrow::Cow<'static, str>], path: &str) -> Result<(), ConfigIssue> {
        if to.is_empty() {
            return Err(ConfigIssue::EmptyReferenceTargets { field: path.to_owned() });
        }
        match to.iter().find(|t| !self.type_names.contains(&***t)) {
            Some(target) => {
                Err(ConfigIssue::UnknownReferenceTarget { field: path.to_owned(), target: target.to_string() })
            },
            None => Ok(()),
        }
    }
}

/// Preview selections must start at a field of the previewed object.
fn preview_paths(preview: &Preview, fields: &[Field], prefix: &str) -> Result<(), ConfigIssue> {
    for path in preview.paths() {
        let head = path.split('.').next().unwrap_or(path);
        if !fields.iter().any(|f| f.name == head) {
            return Err(ConfigIssue::UnknownPreviewField { path: join(prefix, path) });
        }
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_owned() } else { format!("{prefix}.{name}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, BlockConfig, Group};
    use crate::visibility::Hidden;

    fn issue(types: &[DocumentType]) -> ConfigIssue {
        match check_all(types) {
            Err(SchemaError::Configuration { issue, .. }) => issue,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_types_and_fields() {
        let tag = DocumentType::new("tag", "Tag").field(Field::string("title"));
        assert_eq!(issue(&[tag.clone(), tag]), ConfigIssue::DuplicateType);

        let page = DocumentType::new("page", "Page")
            .field(Field::object("hero", [Field::string("badge"), Field::string("badge")]));
        assert_eq!(issue(&[page]), ConfigIssue::DuplicateField { field: "hero.badge".to_owned() });
    }

    #[test]
    fn dangling_references_inside_annotations() {
        let block = BlockConfig::default()
            .annotation(Annotation::new("internalLink", [Field::reference("reference", ["blog"])]));
        let page = DocumentType::new("page", "Page").field(Field::rich_text("body", block));
        assert_eq!(
            issue(&[page]),
            ConfigIssue::UnknownReferenceTarget {
                field: "body.internalLink.reference".to_owned(),
                target: "blog".to_owned()
            }
        );
    }

    #[test]
    fn slug_sources() {
        let missing = DocumentType::new("tag", "Tag").field(Field::new(
            "slug",
            FieldKind::Slug { options: crate::model::SlugOptions::default() },
        ));
        assert_eq!(issue(&[missing]), ConfigIssue::MissingSlugSource { field: "slug".to_owned() });

        let unknown = DocumentType::new("tag", "Tag").field(Field::slug("slug", "name", 96));
        assert_eq!(
            issue(&[unknown]),
            ConfigIssue::UnknownSlugSource { field: "slug".to_owned(), from: "name".to_owned() }
        );
    }

    #[test]
    fn groups_fieldsets_and_toggles() {
        let page = DocumentType::new("page", "Page")
            .group(Group::new("hero", "Hero").default_group())
            .group(Group::new("faq", "FAQ").default_group());
        assert!(matches!(issue(&[page]), ConfigIssue::MultipleDefaultGroups { .. }));

        let page = DocumentType::new("page", "Page").field(Field::string("title").group("seo"));
        assert!(matches!(issue(&[page]), ConfigIssue::UnknownGroup { .. }));

        let page = DocumentType::new("page", "Page").field(Field::string("title").fieldset("hero"));
        assert!(matches!(issue(&[page]), ConfigIssue::UnknownFieldset { .. }));

        let page = DocumentType::new("page", "Page")
            .field(Field::object("hero", [Field::string("badge")]).hidden(Hidden::unless("heroVisible")));
        assert_eq!(
            issue(&[page]),
            ConfigIssue::UnknownVisibilityToggle { field: "hero".to_owned(), toggle: "heroVisible".to_owned() }
        );
    }

    #[test]
    fn arrays_and_previews() {
        let page = DocumentType::new("page", "Page").field(Field::array("items", Vec::<ArrayMember>::new()));
        assert_eq!(issue(&[page]), ConfigIssue::EmptyArrayMembers { field: "items".to_owned() });

        let page = DocumentType::new("page", "Page")
            .field(Field::string("title"))
            .preview(Preview::new().title("title").subtitle("metaTitle"));
        assert_eq!(issue(&[page]), ConfigIssue::UnknownPreviewField { path: "metaTitle".to_owned() });

        let item = ArrayMember::object([Field::string("question")], Some(Preview::new().title("answer")));
        let page = DocumentType::new("page", "Page").field(Field::array("faqs", [item]));
        assert_eq!(issue(&[page]), ConfigIssue::UnknownPreviewField { path: "faqs.answer".to_owned() });
    }

    #[test]
    fn well_formed_types_pass() {
        let tag = DocumentType::new("tag", "Tag")
            .field(Field::string("title"))
            .field(Field::slug("slug", "title", 96))
            .preview(Preview::new().title("title"));
        let blog = DocumentType::new("blog", "Blog")
            .field(Field::array("tags", [ArrayMember::reference(["tag"])]))
            .field(Field::array("related", [ArrayMember::reference(["blog"])]));
        assert!(check_all(&[tag, blog]).is_ok());
    }
}
