//! Ads landing page.
//!
//! Six sections (hero, why us, testimonials, FAQ, comparison, CTA), each with its own
//! editor tab, a boxed fieldset, a "Show this section" switch and a content object that
//! is hidden while the switch is off. Copy slots are rich text in the current revision
//! and plain strings or text areas in the earlier one.

use crate::blocks::link_rule;
use atria_domain::config::AdsPageRevision;
use atria_domain::constants::ADS_PAGE;
use atria_schema::{
    ArrayMember, BlockConfig, DocumentType, Field, Fieldset, Group, Hidden, Preview, Rule,
};

const VIDEO: &str = "video/*";

#[must_use]
pub fn ads_page(revision: AdsPageRevision) -> DocumentType {
    let copy = Slots(revision);
    let page = DocumentType::new(ADS_PAGE, "Ads Landing Page")
        .preview(Preview::new().title("title"))
        .field(
            Field::string("title")
                .title("Page Title")
                .description(r#"Used as the display name in Studio (e.g. "Ads Landing Page - Google")"#)
                .rules(Rule::new().required()),
        )
        .field(
            Field::slug("slug", "title", 96)
                .title("Slug")
                .description("URL-friendly identifier (auto-generated from title)")
                .rules(Rule::new().required()),
        );

    [hero(copy), why_us(copy), testimonials(copy), faq(copy), comparison(copy), cta(copy)]
        .into_iter()
        .fold(page, Section::attach)
}

/// Builds copy slots for one revision.
#[derive(Debug, Clone, Copy)]
struct Slots(AdsPageRevision);

impl Slots {
    /// A short line: heading, badge-like copy.
    fn line(self, name: &'static str) -> Field {
        match self.0 {
            AdsPageRevision::Rich => Field::rich_text(name, BlockConfig::default()),
            AdsPageRevision::Plain => Field::string(name),
        }
    }

    /// A paragraph: subheadings, descriptions, answers.
    fn paragraph(self, name: &'static str) -> Field {
        match self.0 {
            AdsPageRevision::Rich => Field::rich_text(name, BlockConfig::default()),
            AdsPageRevision::Plain => Field::text(name, 3),
        }
    }
}

#[derive(Debug)]
struct Section {
    name: &'static str,
    title: &'static str,
    fields: Vec<Field>,
}

impl Section {
    /// Adds the section's group, fieldset, visibility switch and content object.
    fn attach(page: DocumentType, section: Self) -> DocumentType {
        let Self { name, title, fields } = section;
        let toggle = format!("{name}Visible");
        page.group(Group::new(name, title))
            .fieldset(Fieldset::new(name, format!("🟢 {title}")))
            .field(
                Field::boolean(toggle.clone())
                    .title("Show this section")
                    .initial(true)
                    .group(name)
                    .fieldset(name),
            )
            .field(
                Field::object(name, fields)
                    .title("Content")
                    .group(name)
                    .fieldset(name)
                    .hidden(Hidden::unless(toggle)),
            )
    }
}

fn hero(copy: Slots) -> Section {
    let highlight = ArrayMember::object(
        [copy.line("text").title("Text"), Field::image("logo").title("Logo")],
        Some(Preview::new().title("text").media("logo")),
    );
    Section {
        name: "hero",
        title: "Hero Section",
        fields: vec![
            Field::string("badge").title("Badge Text").description(r#"e.g. "FROM THE FOUNDERS OF""#),
            copy.line("heading")
                .title("Heading")
                .description(r#"e.g. "Go Solar. Save Up to 95%* on Your Electricity Bill.""#),
            copy.paragraph("subheading")
                .title("Subheading")
                .description(r#"e.g. "Made for Bengaluru homes, clear pricing...""#),
            Field::array("highlights", [highlight])
                .title("Highlight Points")
                .description(r#"e.g. "Upto ₹78,000 Subsidy", "50+ Years in Bengaluru""#),
            Field::file("backgroundVideo", VIDEO)
                .title("Background Video")
                .description("Background video for the hero section"),
            copy.line("formHeading")
                .title("Form Heading")
                .description(r#"e.g. "Is your rooftop solar-ready?""#),
            copy.paragraph("formSubheading")
                .title("Form Subheading")
                .description(r#"e.g. "Enter your PIN code to find out...""#),
        ],
    }
}

fn why_us(copy: Slots) -> Section {
    let item = ArrayMember::object(
        [
            Field::string("heading").title("Heading"),
            copy.paragraph("description").title("Description"),
            Field::image("icon").title("Icon"),
            Field::image("image").title("Image"),
        ],
        Some(Preview::new().title("heading").media("icon")),
    );
    Section {
        name: "whyUs",
        title: "Why Us",
        fields: vec![Field::array("items", [item]).title("Feature Items")],
    }
}

fn testimonials(copy: Slots) -> Section {
    let customer = ArrayMember::object(
        [
            Field::string("name").title("Customer Name"),
            copy.line("stats")
                .title("Stats Line")
                .description(r#"e.g. "Reduced 3,449.25 kg CO2 | Saved 158 trees""#),
            Field::image("image").title("Customer Photo"),
        ],
        Some(Preview::new().title("name").media("image")),
    );
    Section {
        name: "testimonials",
        title: "Testimonials & Process",
        fields: vec![
            Field::array("customers", [customer])
                .title("Customer Testimonials")
                .description("Carousel of customer cards (left side)"),
            Field::file("video", VIDEO)
                .title("Section Video")
                .description("Video displayed on the right side of this section"),
            copy.line("ctaHeading")
                .title("CTA Heading")
                .description(r#"e.g. "Atria's 50+ year legacy speaks for itself""#),
            copy.paragraph("ctaSubheading")
                .title("CTA Subheading")
                .description(r#"e.g. "Cut your electricity bills by 95%*.""#),
            Field::string("ctaButtonText")
                .title("CTA Button Text")
                .description(r#"e.g. "Book Free Roof Check""#),
            Field::url("ctaButtonLink").title("CTA Button Link").rules(link_rule()),
        ],
    }
}

fn faq(copy: Slots) -> Section {
    let item = ArrayMember::object(
        [Field::string("question").title("Question"), copy.paragraph("answer").title("Answer")],
        Some(Preview::new().title("question")),
    );
    Section {
        name: "faq",
        title: "FAQ Section",
        fields: vec![
            copy.line("heading").title("Section Heading").description(r#"e.g. "FAQ's""#),
            Field::array("items", [item]).title("Questions & Answers"),
        ],
    }
}

fn comparison(copy: Slots) -> Section {
    let row = ArrayMember::object(
        [
            Field::string("feature").title("Feature"),
            Field::string("atriaSolar").title("Atria Solar"),
            Field::string("otherEpcs").title("Other EPCs"),
        ],
        Some(Preview::new().title("feature").subtitle("atriaSolar")),
    );
    Section {
        name: "comparison",
        title: "Comparison Section",
        fields: vec![
            Field::image("backgroundImage")
                .title("Background Image")
                .description("Background image for the comparison section"),
            copy.line("heading").title("Section Heading").description(r#"e.g. "The Atria Advantage""#),
            Field::array("rows", [row]).title("Comparison Rows"),
        ],
    }
}

fn cta(copy: Slots) -> Section {
    Section {
        name: "cta",
        title: "CTA Section",
        fields: vec![
            copy.line("heading")
                .title("Heading")
                .description(r#"e.g. "Ready to power your home with confidence?""#),
            copy.paragraph("subheading")
                .title("Subheading")
                .description(r#"e.g. "Get a site assessment today. No pressure. Just clarity.""#),
            Field::string("buttonText").title("Button Text").description(r#"e.g. "Call Now""#),
            Field::url("buttonLink")
                .title("Button Link")
                .description(r#"e.g. "tel:+919901100428""#)
                .rules(link_rule()),
        ],
    }
}
