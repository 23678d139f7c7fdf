use atria_domain::constants::CATEGORY;
use atria_schema::{DocumentType, Field, Preview, Rule};

#[must_use]
pub fn category() -> DocumentType {
    DocumentType::new(CATEGORY, "Category")
        .preview(Preview::new().title("title").subtitle("description").media("image"))
        .field(
            Field::string("title")
                .title("Title")
                .description(r#"e.g. "Solar Guides", "Net Metering", "Cost & Savings""#)
                .rules(Rule::new().required()),
        )
        .field(
            Field::slug("slug", "title", 96)
                .title("Slug")
                .description("URL-friendly identifier (auto-generated from title)")
                .rules(Rule::new().required()),
        )
        .field(
            Field::text("description", 3)
                .title("Description")
                .description("A brief description of this category"),
        )
        .field(
            Field::image("image")
                .title("Image")
                .description("Category image used for thumbnails and category listing pages")
                .hotspot()
                .with_fields([Field::string("alt")
                    .title("Alt Text")
                    .description("Describe the image for accessibility and SEO")
                    .rules(Rule::new().required())]),
        )
}
