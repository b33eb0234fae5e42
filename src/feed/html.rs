use scraper::Html;

/// Reduces an HTML fragment to its plain text.
///
/// Markup is dropped and character entities are decoded; whitespace is left
/// exactly as the text nodes carry it, so callers trim where they need to.
/// Never fails: the HTML5 tree builder recovers from any input, and fragments
/// without markup or entities are returned unchanged without parsing.
pub fn reduce(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return fragment.to_string();
    }

    let document = Html::parse_fragment(fragment);
    document.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_tags_and_decodes_entities() {
        assert_eq!(reduce("<p>Hi &amp; bye</p>"), "Hi & bye");
    }

    #[test]
    fn test_empty_fragment() {
        assert_eq!(reduce(""), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(reduce("  just words  "), "  just words  ");
    }

    #[test]
    fn test_nested_markup_concatenates_text() {
        assert_eq!(
            reduce(r#"<div><p>One <a href="https://x">two</a></p><p>three</p></div>"#),
            "One twothree"
        );
    }

    #[test]
    fn test_named_and_numeric_entities() {
        assert_eq!(reduce("caf&eacute; &#8212; &lt;tag&gt;"), "café — <tag>");
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        assert_eq!(reduce("<p>unclosed <b>bold"), "unclosed bold");
        assert_eq!(reduce("a < b"), "a < b");
    }

    #[test]
    fn test_images_only_yield_empty_text() {
        assert_eq!(reduce(r#"<img src="https://x/y.png">"#), "");
    }

    proptest! {
        #[test]
        fn test_reduce_never_panics(input in ".{0,200}") {
            let _ = reduce(&input);
        }

        #[test]
        fn test_text_without_markup_is_identity(input in "[a-zA-Z0-9 .,!?]{0,100}") {
            prop_assert_eq!(reduce(&input), input);
        }
    }
}
