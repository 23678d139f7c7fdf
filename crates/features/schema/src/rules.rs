//! Declarative validation rules.
//!
//! A [`Rule`] is a chain of constraints. Each constraint defaults to [`Level::Error`];
//! calling [`Rule::error`], [`Rule::warning`] or [`Rule::info`] assigns a level and
//! message to every constraint chained since the previous such call:
//!
//! ```rust
//! use atria_schema::rules::{Level, Rule};
//!
//! let rule = Rule::new().min(1).error("Add at least one highlight").max(8).warning("Keep highlights concise");
//! let levels: Vec<Level> = rule.checks().iter().map(|c| c.level).collect();
//! assert_eq!(levels, [Level::Error, Level::Warning]);
//! ```

use crate::validation::uri::UriRule;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use strum_macros::{Display, EnumString};

/// How a failed check affects saving.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    /// Blocks saving.
    Error,
    /// Shown to the editor, does not block saving.
    Warning,
    /// Informational, does not block saving.
    Info,
}

impl Level {
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A single condition on a field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    /// The value must be present and non-empty.
    Required,
    /// Lower bound, inclusive: characters for strings, items for arrays, value for numbers.
    Min(usize),
    /// Upper bound, inclusive, measured like [`Constraint::Min`].
    Max(usize),
    /// Array items must be distinct (references compare by target id).
    Unique,
    /// The string must be a URI with an allowed scheme.
    Uri(UriRule),
    /// Required whenever the named sibling is truthy.
    RequiredWhen(Cow<'static, str>),
    /// The value must equal one of the listed values.
    OneOf(Vec<Value>),
    /// A reference array must not point at the document being validated.
    NotSelf,
}

/// A constraint with its severity and optional custom message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub constraint: Constraint,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,
}

impl Check {
    /// A default-level check as inferred from a field's type.
    pub(crate) const fn inferred(constraint: Constraint) -> Self {
        Self { constraint, level: Level::Error, message: None }
    }
}

/// A chain of checks attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct Rule {
    checks: Vec<Check>,
    #[serde(skip)]
    open_from: usize,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self) -> Self {
        self.push(Constraint::Required)
    }

    pub fn min(self, limit: usize) -> Self {
        self.push(Constraint::Min(limit))
    }

    pub fn max(self, limit: usize) -> Self {
        self.push(Constraint::Max(limit))
    }

    pub fn unique(self) -> Self {
        self.push(Constraint::Unique)
    }

    pub fn uri(self, rule: UriRule) -> Self {
        self.push(Constraint::Uri(rule))
    }

    pub fn required_when(self, sibling: impl Into<Cow<'static, str>>) -> Self {
        self.push(Constraint::RequiredWhen(sibling.into()))
    }

    pub fn one_of(self, values: impl IntoIterator<Item = Value>) -> Self {
        self.push(Constraint::OneOf(values.into_iter().collect()))
    }

    pub fn not_self(self) -> Self {
        self.push(Constraint::NotSelf)
    }

    /// Marks the open checks as blocking, with a custom message.
    pub fn error(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.close(Level::Error, Some(message.into()))
    }

    /// Marks the open checks as non-blocking warnings, with a custom message.
    pub fn warning(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.close(Level::Warning, Some(message.into()))
    }

    /// Marks the open checks as informational, with a custom message.
    pub fn info(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.close(Level::Info, Some(message.into()))
    }

    /// Sets a level on the open checks and keeps their default messages.
    pub fn level(self, level: Level) -> Self {
        self.close(level, None)
    }

    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.checks.iter().any(|c| c.constraint == Constraint::Required)
    }

    /// Whether any check uses a constraint matching `pred`.
    pub(crate) fn has(&self, pred: impl Fn(&Constraint) -> bool) -> bool {
        self.checks.iter().any(|c| pred(&c.constraint))
    }

    fn push(mut self, constraint: Constraint) -> Self {
        self.checks.push(Check { constraint, level: Level::Error, message: None });
        self
    }

    fn close(mut self, level: Level, message: Option<Cow<'static, str>>) -> Self {
        for check in &mut self.checks[self.open_from..] {
            check.level = level;
            check.message.clone_from(&message);
        }
        self.open_from = self.checks.len();
        self
    }
}
