use atria_domain::constants::TAG;
use atria_schema::{DocumentType, Field, Preview, Rule};

#[must_use]
pub fn tag() -> DocumentType {
    DocumentType::new(TAG, "Tag")
        .preview(Preview::new().title("title"))
        .field(
            Field::string("title")
                .title("Title")
                .description(r#"e.g. "BESCOM", "Bangalore", "Solar Savings", "Net Metering""#)
                .rules(Rule::new().required()),
        )
        .field(
            Field::slug("slug", "title", 96)
                .title("Slug")
                .description("URL-friendly identifier (auto-generated from title)")
                .rules(Rule::new().required()),
        )
}
