//! Cleaning of untrusted post content.

use scraper::{ElementRef, Html};

/// Tags whose entire content is dropped, not just the markup.
const DROP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "object", "embed"];

/// Strip markup from untrusted post content, leaving plain text.
///
/// Ordinary tags lose their markup but keep their text; dangerous
/// containers (scripts, styles, embeds) are dropped wholesale. HTML
/// entities are decoded by the parser, so the result is plain text
/// safe to hand to any renderer that escapes on output.
pub fn clean_html(content: &str) -> String {
    let fragment = Html::parse_fragment(content);

    let mut text = String::new();
    collect_text(&fragment.root_element(), &mut text);

    collapse_whitespace(&text)
}

fn collect_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            scraper::node::Node::Text(t) => {
                out.push_str(&t.text);
            }
            scraper::node::Node::Element(el) => {
                if DROP_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(clean_html("hello world"), "hello world");
    }

    #[test]
    fn test_markup_is_stripped_but_text_kept() {
        assert_eq!(clean_html("<b>bold</b> and <i>italic</i>"), "bold and italic");
    }

    #[test]
    fn test_script_content_is_dropped() {
        assert_eq!(
            clean_html("before<script>alert('pwned')</script>after"),
            "beforeafter"
        );
    }

    #[test]
    fn test_style_content_is_dropped() {
        assert_eq!(clean_html("<style>body { display: none }</style>text"), "text");
    }

    #[test]
    fn test_nested_markup() {
        assert_eq!(
            clean_html("<div><p>first</p> <p><em>second</em></p></div>"),
            "first second"
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(clean_html("fish &amp; chips"), "fish & chips");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(clean_html("  a\n\n  b\tc  "), "a b c");
    }

    #[test]
    fn test_event_handler_markup_is_gone() {
        let cleaned = clean_html(r#"<img src="x" onerror="alert(1)">caption"#);
        assert_eq!(cleaned, "caption");
    }
}
