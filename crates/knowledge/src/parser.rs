//! Markdown and HTML to plain text.

use pulldown_cmark::{html, Options, Parser};
use scraper::Html;

/// Elements whose text never reaches the corpus.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Render markdown to HTML, then extract its text.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    html::push_html(&mut rendered, parser);

    html_to_text(&rendered)
}

/// Extract the text of an HTML fragment.
///
/// Every text node is trimmed; empty nodes are dropped and the rest are
/// joined with a newline.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in fragment.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| SKIPPED_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(markdown_to_text("# Hi\nWorld"), "Hi\nWorld");
    }

    #[test]
    fn test_markdown_formatting_is_removed() {
        let text = markdown_to_text("Use **pandas** and `read_csv`.\n\n- one\n- two\n");
        assert!(!text.contains("**"));
        assert!(!text.contains('`'));
        assert!(text.contains("pandas"));
        assert!(text.contains("read_csv"));
        assert!(text.contains("one\ntwo"));
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let text = markdown_to_text("```python\nx = 1\ny = 2\n```\n");
        assert_eq!(text, "x = 1\ny = 2");
    }

    #[test]
    fn test_html_inline_elements_split_on_newline() {
        assert_eq!(
            html_to_text("<p>Hello <b>world</b></p>"),
            "Hello\nworld"
        );
    }

    #[test]
    fn test_html_entities_are_decoded() {
        assert_eq!(html_to_text("<p>a &amp; b &lt; c</p>"), "a & b < c");
    }

    #[test]
    fn test_script_and_style_are_dropped() {
        let text = html_to_text(
            "<style>p{color:red}</style><p>visible</p><script>alert(1)</script>",
        );
        assert_eq!(text, "visible");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(markdown_to_text(""), "");
    }
}
