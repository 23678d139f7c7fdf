//! Blog posts: content, SEO metadata and FAQs.

use crate::blocks;
use atria_domain::constants::{BLOG, CATEGORY, TAG};
use atria_schema::{
    ArrayMember, DocumentType, Field, Group, Level, ListLayout, Preview, PreviewValues, Rule,
};
use serde_json::{Map, Value};

const CONTENT: &str = "content";
const SEO: &str = "seo";
const FAQS: &str = "faqs";

pub const META_TITLE_MAX: usize = 70;
pub const META_DESCRIPTION_MAX: usize = 160;
pub const RELATED_BLOGS_MAX: usize = 4;

#[must_use]
pub fn blog() -> DocumentType {
    DocumentType::new(BLOG, "Blog")
        .preview(Preview::new().title("title").subtitle("metaTitle").media("featuredImage"))
        .group(Group::new(CONTENT, "Content").default_group())
        .group(Group::new(SEO, "SEO & Meta"))
        .group(Group::new(FAQS, "FAQs"))
        .fields(content())
        .fields(seo())
        .field(faqs())
}

fn content() -> Vec<Field> {
    let fields = vec![
        Field::string("title")
            .title("Blog Title")
            .description("Main heading of the blog post")
            .rules(Rule::new().required()),
        Field::slug("slug", "title", 96)
            .title("Slug")
            .description("URL-friendly identifier (auto-generated from title)")
            .rules(Rule::new().required()),
        Field::boolean("isFeatured")
            .title("Featured Blog")
            .description("Mark this blog as featured to highlight it on the homepage or listing pages")
            .initial(false),
        Field::image("featuredImage")
            .title("Featured Image")
            .description("Primary image used for thumbnails, social sharing, and the blog hero")
            .hotspot()
            .with_fields([Field::string("alt")
                .title("Alt Text")
                .description("Describe the image for accessibility and SEO")
                .rules(Rule::new().required())]),
        Field::datetime("publishedAt")
            .title("Published Date")
            .description("When the blog was published (used for sorting and display)")
            .initial_now()
            .rules(Rule::new().required()),
        Field::array("categories", [ArrayMember::reference([CATEGORY])])
            .title("Categories")
            .description("Categories this blog post belongs to")
            .rules(Rule::new().required().min(1).error("Add at least one category").unique()),
        Field::array("tags", [ArrayMember::reference([TAG])])
            .title("Tags")
            .description("Tags to help organize and filter blog posts")
            .rules(Rule::new().unique()),
        Field::array("relatedBlogs", [ArrayMember::reference([BLOG])])
            .title("Related Blogs")
            .description("Hand-picked related blog posts shown at the bottom")
            .rules(
                Rule::new()
                    .max(RELATED_BLOGS_MAX)
                    .warning("Keep related blogs to 4 or fewer for best UX")
                    .unique()
                    .level(Level::Error)
                    .not_self()
                    .level(Level::Warning),
            ),
        blocks::article("excerpt")
            .title("Excerpt")
            .description("A short summary about the blog post"),
        Field::array("blogHighlights", [ArrayMember::string()])
            .title("Blog Highlights")
            .description("Key takeaways shown at the top of the blog post")
            .rules(
                Rule::new()
                    .min(1)
                    .error("Add at least one highlight")
                    .max(8)
                    .warning("Keep highlights concise"),
            ),
        blocks::article("body").title("Body").description(
            "Main blog content: use headings, paragraphs, lists, images, and inline links",
        ),
    ];
    fields.into_iter().map(|f| f.group(CONTENT)).collect()
}

fn seo() -> Vec<Field> {
    let fields = vec![
        Field::string("metaTitle")
            .title("Meta Title")
            .description("Title tag for search engines (50–60 characters ideal)")
            .rules(
                Rule::new()
                    .required()
                    .level(Level::Error)
                    .max(META_TITLE_MAX)
                    .warning("Meta title should be under 70 characters for best SEO"),
            ),
        Field::text("metaDescription", 3)
            .title("Meta Description")
            .description("Description shown in search results (120–160 characters ideal)")
            .rules(
                Rule::new()
                    .required()
                    .level(Level::Error)
                    .max(META_DESCRIPTION_MAX)
                    .warning("Meta description should be under 160 characters for best SEO"),
            ),
        Field::array("keywords", [keyword()])
            .title("Target Keywords")
            .description("Keywords this blog targets along with their search metrics"),
    ];
    fields.into_iter().map(|f| f.group(SEO)).collect()
}

fn keyword() -> ArrayMember {
    let preview = Preview::new()
        .title("keyword")
        .subtitle("avgMonthlySearches")
        .select("competition", "competition")
        .prepare(keyword_preview);

    ArrayMember::object(
        [
            Field::string("keyword").title("Keyword").rules(Rule::new().required()),
            Field::string("currency").title("Currency").initial("INR"),
            Field::number("avgMonthlySearches").title("Avg. Monthly Searches"),
            Field::string("threeMonthChange")
                .title("Three Month Change")
                .description(r#"e.g. "0%", "-100%", "23%""#),
            Field::string("yoyChange")
                .title("Year-over-Year Change")
                .description(r#"e.g. "0%", "-33%", "22%""#),
            Field::string("competition").title("Competition").list(
                ListLayout::Radio,
                [("Low", "low"), ("Medium", "medium"), ("High", "high"), ("Unknown", "unknown")],
            ),
        ],
        Some(preview),
    )
}

/// `"<searches> searches/mo · <competition>"`; missing metrics show as a dash.
fn keyword_preview(selection: &Map<String, Value>) -> PreviewValues {
    let metric = |key: &str| match selection.get(key) {
        None | Some(Value::Null) => "—".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let title = selection
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled");

    PreviewValues {
        title: title.to_owned(),
        subtitle: Some(format!("{} searches/mo · {}", metric("subtitle"), metric("competition"))),
        media: None,
    }
}

fn faqs() -> Field {
    let item = ArrayMember::object(
        [
            Field::string("question").title("Question").rules(Rule::new().required()),
            Field::rich_text("answer", blocks::answer()).title("Answer").rules(Rule::new().required()),
        ],
        Some(Preview::new().title("question")),
    );
    Field::array("faqs", [item])
        .title("FAQs")
        .description("Frequently asked questions shown at the bottom of the blog")
        .group(FAQS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_and_defaults() {
        let blog = blog();
        assert_eq!(blog.default_group().unwrap().name, CONTENT);
        assert_eq!(blog.fields_in_group(SEO).count(), 3);
        assert_eq!(blog.fields_in_group(FAQS).count(), 1);
        assert!(blog.fields.iter().all(|f| f.groups.len() == 1));
        assert!(blog.get_field("categories").unwrap().is_required());
        assert!(!blog.get_field("tags").unwrap().is_required());
    }

    #[test]
    fn keyword_preview_fills_gaps() {
        let values = keyword_preview(json!({ "title": "solar panels", "subtitle": 2400, "competition": "high" }).as_object().unwrap());
        assert_eq!(values.title, "solar panels");
        assert_eq!(values.subtitle.as_deref(), Some("2400 searches/mo · high"));

        let values = keyword_preview(&Map::new());
        assert_eq!(values.title, "Untitled");
        assert_eq!(values.subtitle.as_deref(), Some("— searches/mo · —"));
    }

    #[test]
    fn related_blogs_checks() {
        let blog = blog();
        let checks = blog.get_field("relatedBlogs").unwrap().rules.checks();
        let levels: Vec<_> = checks.iter().map(|c| c.level).collect();
        assert_eq!(levels, [Level::Warning, Level::Error, Level::Warning]);
    }
}
