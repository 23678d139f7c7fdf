use atria_schema::slug::{is_url_safe, slugify};
use proptest::prelude::*;

proptest! {
    #[test]
    fn slugs_are_url_safe_and_bounded(source in "\\PC{0,120}", max in 1usize..120) {
        let slug = slugify(&source, max);
        prop_assert!(slug.len() <= max);
        prop_assert!(is_url_safe(&slug));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn short_titles_are_only_slugified(words in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
        let title = words.join(" ");
        let slug = slugify(&title, 96);
        prop_assert_eq!(slug, words.join("-"));
    }

    #[test]
    fn slugify_is_idempotent(source in "\\PC{0,80}") {
        let once = slugify(&source, 96);
        prop_assert_eq!(slugify(&once, 96), once.clone());
    }
}

#[test]
fn accented_titles_are_transliterated() {
    assert_eq!(slugify("Über Net-Metering", 96), "uber-net-metering");
    assert_eq!(slugify("Énergie Solaire à Pondichéry", 96), "energie-solaire-a-pondichery");
}

proptest! {
    #[test]
    fn latin_letters_are_never_dropped(word in "[a-zA-Zàáâäçèéêëìíîïñòóôöùúûü]{1,12}") {
        let slug = slugify(&word, 96);
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.chars().count() >= word.chars().count());
    }
}
