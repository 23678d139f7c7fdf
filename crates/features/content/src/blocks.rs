//! Rich text shapes shared by several document types.

use atria_domain::constants::BLOG;
use atria_domain::marks::{BlockStyles, Decorators, ListStyles};
use atria_schema::{Annotation, ArrayMember, BlockConfig, Field, Rule, UriRule};

/// Schemes accepted by editor-entered links and call-to-action buttons.
pub(crate) const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Links may point at other pages of the site or open a phone/mail client.
pub(crate) fn link_rule() -> Rule {
    Rule::new().uri(UriRule::new().schemes(LINK_SCHEMES).allow_relative(true))
}

/// External link annotation: `href` plus a new-tab switch that starts on.
pub(crate) fn external_link(title: &'static str) -> Annotation {
    Annotation::new(
        "link",
        [
            Field::url("href").title("URL").rules(link_rule()),
            Field::boolean("openInNewTab").title("Open in new tab").initial(true),
        ],
    )
    .title(title)
}

fn internal_link() -> Annotation {
    Annotation::new("internalLink", [Field::reference("reference", [BLOG]).title("Reference")])
        .title("Internal Link")
}

/// Article copy: normal text, H2 to H4, quotes, both list kinds and basic emphasis.
pub(crate) fn editorial() -> BlockConfig {
    BlockConfig::new(
        BlockStyles::EDITORIAL,
        ListStyles::BULLET | ListStyles::NUMBER,
        Decorators::EDITORIAL,
    )
    .annotation(external_link("External Link"))
    .annotation(internal_link())
}

/// Inline article image with required alt text.
pub(crate) fn article_image() -> ArrayMember {
    ArrayMember::image(
        true,
        [
            Field::string("alt").title("Alt Text").rules(Rule::new().required()),
            Field::string("caption").title("Caption"),
        ],
    )
}

/// Article body: editorial blocks and inline images.
pub(crate) fn article(name: &'static str) -> Field {
    Field::array(name, [ArrayMember::block(editorial()), article_image()])
}

/// Platform block marks with a single link annotation, for short answers.
pub(crate) fn answer() -> BlockConfig {
    BlockConfig::with_annotations([external_link("Link")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editorial_marks() {
        let block = editorial();
        assert!(block.styles.allows("h4"));
        assert!(!block.styles.allows("h1"));
        assert!(block.lists.allows("number"));
        assert!(!block.marks.decorators.allows("code"));
        assert_eq!(block.marks.annotations.len(), 2);
        assert!(block.get_annotation("internalLink").is_some());
    }

    #[test]
    fn answers_keep_platform_styles() {
        let block = answer();
        assert!(block.styles.allows("h1"));
        assert_eq!(block.marks.annotations.len(), 1);
        assert_eq!(block.get_annotation("link").unwrap().fields[1].name, "openInNewTab");
    }
}
