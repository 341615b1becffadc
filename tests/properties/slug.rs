//! Property tests for slug and path derivation.

use proptest::prelude::*;

use folio::domain::value_objects::{generate_path, generate_slug, title_from_filename};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: slugs only contain `[a-z0-9-]`, never start or end with `-`,
    /// and never contain `--`.
    #[test]
    fn property_slug_shape(title in "(?s).{0,80}") {
        let slug = generate_slug(&title);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// PROPERTY: slug derivation is a pure function of the title.
    #[test]
    fn property_slug_is_deterministic(title in "(?s).{0,80}") {
        prop_assert_eq!(generate_slug(&title), generate_slug(&title));
    }

    /// PROPERTY: case never changes the slug.
    #[test]
    fn property_slug_ignores_ascii_case(title in "[A-Za-z0-9 ]{0,40}") {
        prop_assert_eq!(generate_slug(&title), generate_slug(&title.to_uppercase()));
    }

    /// PROPERTY: the published path is always an `.html` file named after the slug.
    #[test]
    fn property_path_is_html(title in "(?s).{0,80}") {
        let path = generate_path(&title);
        prop_assert!(path.ends_with(".html"));
        prop_assert!(!path.contains('/'));
        let slug = generate_slug(&title);
        if !slug.is_empty() {
            prop_assert_eq!(path, format!("{}.html", slug));
        }
    }

    /// PROPERTY: a slugged file name maps back to a title with the same slug.
    #[test]
    fn property_filename_title_keeps_slug(words in proptest::collection::vec("[a-z0-9]{1,8}", 1..5)) {
        let slug = words.join("-");
        let title = title_from_filename(&format!("{}.html", slug));
        prop_assert_eq!(generate_slug(&title), slug);
    }
}
