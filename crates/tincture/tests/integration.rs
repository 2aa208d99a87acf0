use proptest::prelude::*;
use tincture::l10n::Format;
use tincture::{
    build_bold_text, is_valid_email, parse_markup, AttributeKey, Catalog, FormatError, Localizer,
    PointSize,
};

#[test]
fn test_bold_runs_follow_first_occurrences() {
    let size = PointSize::new(16.0).unwrap();
    let styled = build_bold_text("Paid 20 of 20 on Friday", ["20", "Friday", "Monday"], size);

    assert_eq!(styled.text(), "Paid 20 of 20 on Friday");
    let ranges: Vec<_> = styled.runs().iter().map(|run| run.range()).collect();
    assert_eq!(ranges, vec![5..7, 17..23]);
    assert!(!styled.is_bold_at(11));
}

#[test]
fn test_email_examples() {
    assert!(is_valid_email("user@domain.com"));
    assert!(!is_valid_email("user@domain"));
    assert!(!is_valid_email("user domain.com"));
    assert!(!is_valid_email("@domain.com"));
}

#[test]
fn test_localization_examples() {
    let empty = Localizer::new(Catalog::new());
    assert!(empty.localize("greeting").contains("greeting"));

    let localizer = Localizer::new(Catalog::new().with_entry("Localizable", "hello", "Hello %s"));
    assert_eq!(
        localizer
            .localize_formatted("hello", &["World".into()])
            .unwrap(),
        "Hello World"
    );
    assert!(matches!(
        localizer.localize_formatted("hello", &[]),
        Err(FormatError::ArgumentMismatch { .. })
    ));
}

#[test]
fn test_markup_example() {
    let styled = parse_markup("<b>Hello</b> World").unwrap();
    assert_eq!(styled.text(), "Hello World");
    assert_eq!(styled.runs().len(), 1);
    assert_eq!(styled.runs()[0].range(), 0..5);
    assert!(styled.runs()[0].attributes().contains(AttributeKey::Bold));
}

#[test]
fn test_localized_markup_pipeline() {
    let catalog = Catalog::new().with_entry("Localizable", "welcome", "Welcome back, <b>%@</b>!");
    let localizer = Localizer::new(catalog);

    let markup = localizer
        .localize_formatted("welcome", &["Sam".into()])
        .unwrap();
    let styled = parse_markup(&markup).unwrap();

    assert_eq!(styled.text(), "Welcome back, Sam!");
    let name = styled.text().find("Sam").unwrap();
    assert!(styled.is_bold_at(name));
    assert!(!styled.is_bold_at(0));
}

#[test]
fn test_android_markup_string_feeds_parser() {
    let mut catalog = Catalog::new();
    catalog
        .load_str(
            "Localizable",
            r#"<resources><string name="welcome">Hello <b>%1$s</b>!</string></resources>"#,
            Format::AndroidXml,
        )
        .unwrap();
    let localizer = Localizer::new(catalog);

    let markup = localizer
        .localize_formatted("welcome", &["Ana".into()])
        .unwrap();
    assert_eq!(markup, "Hello <b>Ana</b>!");

    let styled = parse_markup(&markup).unwrap();
    assert_eq!(styled.text(), "Hello Ana!");
    assert_eq!(styled.runs()[0].range(), 6..9);
}

#[test]
fn test_missing_key_is_formatted_like_a_template() {
    let localizer = Localizer::new(Catalog::new());
    assert_eq!(
        localizer
            .localize_formatted("Hello %s", &["World".into()])
            .unwrap(),
        "[!Hello World]"
    );
    assert!(matches!(
        localizer.localize_formatted("Hello %s", &[]),
        Err(FormatError::ArgumentMismatch {
            required: 1,
            supplied: 0
        })
    ));
}

proptest! {
    #[test]
    fn bold_text_preserves_plain_text(
        full in "[a-z ]{0,40}",
        subs in prop::collection::vec("[a-z]{0,4}", 0..5)
    ) {
        let styled = build_bold_text(&full, &subs, PointSize::DEFAULT);
        prop_assert_eq!(styled.text(), full.as_str());
        for run in styled.runs() {
            prop_assert!(run.end() <= full.len());
        }
    }

    #[test]
    fn generated_addresses_validate(
        local in "[A-Za-z0-9._%+-]{1,16}",
        domain in "[A-Za-z0-9-]{1,16}",
        tld in "[A-Za-z]{2,10}"
    ) {
        let address = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&address));
        let trailing_space = format!("{address} ");
        prop_assert!(!is_valid_email(&trailing_space));
    }
}
