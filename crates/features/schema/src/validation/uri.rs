//! URL scheme allow-listing.

use serde::Serialize;
use std::borrow::Cow;
use url::{ParseError, Url};

/// Base used to resolve relative values when they are allowed.
const RELATIVE_BASE: &str = "http://localhost/";

/// Constraint on a URL string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct UriRule {
    #[serde(rename = "scheme")]
    pub schemes: Vec<Cow<'static, str>>,
    pub allow_relative: bool,
    pub allow_credentials: bool,
}

impl Default for UriRule {
    fn default() -> Self {
        Self {
            schemes: vec!["http".into(), "https".into()],
            allow_relative: false,
            allow_credentials: false,
        }
    }
}

/// Why a value failed a [`UriRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriViolation {
    Invalid,
    Relative,
    Scheme,
    Credentials,
}

impl UriViolation {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Invalid => "Not a valid URL",
            Self::Relative => "Relative URLs are not allowed",
            Self::Scheme => "Does not match allowed protocols/schemes",
            Self::Credentials => "Username/password not allowed",
        }
    }
}

impl UriRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_relative(mut self, allow: bool) -> Self {
        self.allow_relative = allow;
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Checks a value.
    ///
    /// # Errors
    /// Returns the first violated condition.
    pub fn check(&self, value: &str) -> Result<(), UriViolation> {
        // Relative values are checked as resolved, so `//host/x` counts as `http:`.
        let url = match Url::parse(value) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) if self.allow_relative => Url::parse(RELATIVE_BASE)
                .and_then(|base| base.join(value))
                .map_err(|_| UriViolation::Invalid)?,
            Err(ParseError::RelativeUrlWithoutBase) => return Err(UriViolation::Relative),
            Err(_) => return Err(UriViolation::Invalid),
        };

        if !self.schemes.iter().any(|s| s.eq_ignore_ascii_case(url.scheme())) {
            return Err(UriViolation::Scheme);
        }
        if !self.allow_credentials && (!url.username().is_empty() || url.password().is_some()) {
            return Err(UriViolation::Credentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_rule() -> UriRule {
        UriRule::new().schemes(["http", "https", "mailto", "tel"]).allow_relative(true)
    }

    #[test]
    fn link_schemes() {
        let rule = link_rule();
        assert_eq!(rule.check("https://atriasolar.com/pricing"), Ok(()));
        assert_eq!(rule.check("tel:+919901100428"), Ok(()));
        assert_eq!(rule.check("mailto:hello@atriasolar.com"), Ok(()));
        assert_eq!(rule.check("/book-roof-check"), Ok(()));
        assert_eq!(rule.check("#faq"), Ok(()));
        assert_eq!(rule.check("ftp://files.example.com"), Err(UriViolation::Scheme));
    }

    #[test]
    fn defaults_reject_relative_and_credentials() {
        let rule = UriRule::default();
        assert_eq!(rule.check("/pricing"), Err(UriViolation::Relative));
        assert_eq!(rule.check("https://user:pw@example.com"), Err(UriViolation::Credentials));
        assert_eq!(rule.check("http://"), Err(UriViolation::Invalid));
        assert_eq!(rule.check("tel:+91"), Err(UriViolation::Scheme));
        assert!(rule.clone().allow_credentials(true).check("https://user:pw@example.com").is_ok());
    }

    #[test]
    fn relative_values_resolve_before_the_scheme_check() {
        let rule = UriRule::new().schemes(["mailto"]).allow_relative(true);
        assert_eq!(rule.check("/x"), Err(UriViolation::Scheme));
        assert_eq!(rule.check("//evil.example/x"), Err(UriViolation::Scheme));
        assert_eq!(rule.check("mailto:hello@atriasolar.com"), Ok(()));

        let rule = UriRule::new().schemes(["https"]).allow_relative(true);
        assert_eq!(rule.check("//cdn.atriasolar.com/logo.svg"), Err(UriViolation::Scheme));
    }
}
