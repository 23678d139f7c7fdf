//! Slug generation from a source field.

use crate::model::SlugOptions;
use crate::value;
use serde_json::{Map, Value};

/// Turns arbitrary text into a URL-safe slug of at most `max_length` characters.
///
/// Letters are transliterated to ASCII and lower-cased, runs of anything else become a
/// single `-`; `&`, `|`, `<` and `>` become words of their own. Truncation never splits
/// a word unless the first word alone is longer than the limit.
///
/// ```rust
/// use atria_schema::slug::slugify;
///
/// assert_eq!(slugify("Go Solar Now", 96), "go-solar-now");
/// assert_eq!(slugify("Cost & Savings", 96), "cost-and-savings");
/// assert_eq!(slugify("Net Metering Explained", 16), "net-metering");
/// assert_eq!(slugify("Über Net-Metering", 96), "uber-net-metering");
/// ```
#[must_use]
pub fn slugify(source: &str, max_length: usize) -> String {
    let mut slug = String::with_capacity(source.len().min(max_length));
    for word in words(source) {
        if slug.is_empty() {
            if word.len() > max_length {
                // ASCII only, so byte and char lengths agree.
                return word[..max_length].to_owned();
            }
            slug.push_str(&word);
        } else if slug.len() + 1 + word.len() <= max_length {
            slug.push('-');
            slug.push_str(&word);
        } else {
            break;
        }
    }
    slug
}

/// Splits `source` into transliterated ASCII words, spelling out the symbols that
/// carry meaning in titles.
fn words(source: &str) -> Vec<String> {
    let mut words = Vec::new();

    let mut rest = source;
    while let Some(at) = rest.find(['&', '|', '<', '>']) {
        push_run(&mut words, &rest[..at]);
        let spelled = match rest.as_bytes()[at] {
            b'&' => "and",
            b'|' => "or",
            b'<' => "less",
            _ => "greater",
        };
        words.push(spelled.to_owned());
        rest = &rest[at + 1..];
    }
    push_run(&mut words, rest);
    words
}

fn push_run(words: &mut Vec<String>, run: &str) {
    words.extend(::slug::slugify(run).split('-').filter(|w| !w.is_empty()).map(str::to_owned));
}

/// Whether a slug only uses URL-safe characters (`a-z 0-9 - _ . ~`).
#[must_use]
pub fn is_url_safe(slug: &str) -> bool {
    slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.' | '~'))
}

impl SlugOptions {
    /// Generates a slug from the source field of the enclosing object.
    ///
    /// Rich text sources are flattened to their first block. Returns `None` when the
    /// source is empty or yields no characters.
    #[must_use]
    pub fn generate(&self, parent: &Map<String, Value>) -> Option<String> {
        let source = value::lookup(parent, self.source.as_deref()?)?;
        let slug = slugify(&value::plain_text(source)?, self.max_length());
        (!slug.is_empty()).then_some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spells_out_symbols_and_collapses_separators() {
        assert_eq!(slugify("  Solar -- Guides!! ", 96), "solar-guides");
        assert_eq!(slugify("Solar&Co", 96), "solar-and-co");
        assert_eq!(slugify("BESCOM | Bangalore", 96), "bescom-or-bangalore");
        assert_eq!(slugify("Savings > Costs", 96), "savings-greater-costs");
        assert_eq!(slugify("Up to 78,000 Subsidy", 96), "up-to-78-000-subsidy");
        assert_eq!(slugify("!!!", 96), "");
    }

    #[test]
    fn transliterates_accented_letters() {
        assert_eq!(slugify("Über Net-Metering", 96), "uber-net-metering");
        assert_eq!(slugify("Café Solar Día", 96), "cafe-solar-dia");
        assert_eq!(slugify("Ångström & Co", 96), "angstrom-and-co");
    }

    #[test]
    fn truncates_on_word_boundaries() {
        assert_eq!(slugify("Go Solar Now", 8), "go-solar");
        assert_eq!(slugify("Go Solar Now", 7), "go");
        assert_eq!(slugify("Photovoltaics", 5), "photo");
        assert_eq!(slugify("Go Solar Now", 0), "");
    }

    #[test]
    fn generates_from_sibling_source() {
        let options = SlugOptions { source: Some("title".into()), max_length: Some(96) };
        let doc = json!({ "title": "Ads Landing Page - Google" });
        assert_eq!(options.generate(doc.as_object().unwrap()).as_deref(), Some("ads-landing-page-google"));
        assert_eq!(options.generate(json!({ "title": "" }).as_object().unwrap()), None);
    }

    #[test]
    fn url_safety() {
        assert!(is_url_safe("go-solar_now.v2~"));
        assert!(!is_url_safe("Go-Solar"));
        assert!(!is_url_safe("go solar"));
    }
}
