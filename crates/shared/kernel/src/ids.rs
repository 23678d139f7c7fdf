use atria_domain::constants::DRAFTS_PREFIX;
use std::borrow::Cow;

const MAX_ID_LEN: usize = 128;

#[atria_derive::atria_error]
pub enum DocumentIdError {
    #[error("Invalid document id{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Helpers for document ids and their `drafts.` copies.
#[derive(Debug)]
pub struct DocumentId;

impl DocumentId {
    /// Checks an id against the platform's id alphabet (`A-Z a-z 0-9 . _ -`, at most
    /// 128 characters, not starting with `-`).
    ///
    /// # Errors
    /// Returns [`DocumentIdError::Invalid`] describing the first violation.
    pub fn verify(id: &str) -> Result<&str, DocumentIdError> {
        if id.is_empty() || id.len() > MAX_ID_LEN {
            return Err(DocumentIdError::Invalid {
                message: format!("expected 1..={MAX_ID_LEN} characters, got {}", id.len()).into(),
                context: None,
            });
        }
        if id.starts_with('-') {
            return Err(DocumentIdError::Invalid {
                message: "id cannot start with '-'".into(),
                context: Some(id.to_owned().into()),
            });
        }
        if let Some(ch) = id.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))) {
            return Err(DocumentIdError::Invalid {
                message: format!("unexpected character '{ch}'").into(),
                context: Some(id.to_owned().into()),
            });
        }
        Ok(id)
    }

    /// The published id of a document, stripping a `drafts.` prefix if present.
    #[must_use]
    pub fn published(id: &str) -> &str {
        id.strip_prefix(DRAFTS_PREFIX).unwrap_or(id)
    }

    /// The draft id for a document id.
    #[must_use]
    pub fn draft(id: &str) -> String {
        if Self::is_draft(id) { id.to_owned() } else { format!("{DRAFTS_PREFIX}{id}") }
    }

    #[must_use]
    pub fn is_draft(id: &str) -> bool {
        id.starts_with(DRAFTS_PREFIX)
    }

    /// Whether two ids name the same logical document (draft and published copies match).
    #[must_use]
    pub fn same_document(a: &str, b: &str) -> bool {
        Self::published(a) == Self::published(b)
    }

    /// A new random id of 21 unambiguous characters.
    #[must_use]
    pub fn generate() -> String {
        crate::nanoid!(21, crate::SAFE_ALPHABET)
    }
}
