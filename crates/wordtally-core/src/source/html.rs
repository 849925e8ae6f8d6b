//! HTML to plain text.

use scraper::{ElementRef, Html, Node};

/// Elements whose content is never visible text.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "svg", "iframe"];

/// Elements that start on a new line when rendered. Text on either side of
/// them must not run together into one word.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "option", "p", "pre", "section", "table", "td", "th", "title", "tr",
    "ul",
];

enum Step<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
    Break,
}

/// Extract the visible text of an HTML document.
///
/// Text nodes are concatenated in document order; block-level elements are
/// separated by whitespace and runs of whitespace collapse to a single space.
/// Script, style and similar subtrees are dropped. Malformed markup is
/// handled the way browsers handle it.
#[tracing::instrument(skip_all, fields(input_len = html.len()))]
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::with_capacity(html.len() / 2);
    let mut stack = vec![Step::Element(document.root_element())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => raw.push_str(text),
            Step::Break => raw.push(' '),
            Step::Element(element) => {
                let name = element.value().name();
                if HIDDEN.contains(&name) {
                    continue;
                }
                let block = BLOCKS.contains(&name);
                if block {
                    stack.push(Step::Break);
                }
                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    match child.value() {
                        Node::Text(text) => stack.push(Step::Text(&text[..])),
                        Node::Element(_) => {
                            if let Some(child) = ElementRef::wrap(child) {
                                stack.push(Step::Element(child));
                            }
                        }
                        _ => {}
                    }
                }
                if block {
                    stack.push(Step::Break);
                }
            }
        }
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_text() {
        let html = "<html><head><title>Page</title></head>\
                    <body><p>Hello <b>bold</b> world.</p></body></html>";
        assert_eq!(html_to_text(html), "Page Hello bold world.");
    }

    #[test]
    fn inline_elements_do_not_split_words() {
        assert_eq!(html_to_text("<p>un<em>believ</em>able</p>"), "unbelievable");
    }

    #[test]
    fn block_elements_separate_words() {
        assert_eq!(
            html_to_text("<div>first</div><div>second</div><p>third<br>fourth</p>"),
            "first second third fourth"
        );
        assert_eq!(
            html_to_text("<ul><li>one</li><li>two</li></ul>"),
            "one two"
        );
    }

    #[test]
    fn drops_scripts_and_styles() {
        let html = "<body><script>var hidden = 1;</script>\
                    <style>p { color: red; }</style><p>shown</p></body>";
        assert_eq!(html_to_text(html), "shown");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(html_to_text("<p>fish &amp; chips</p>"), "fish & chips");
    }

    #[test]
    fn tolerates_fragments_and_broken_markup() {
        assert_eq!(html_to_text("plain <p>unclosed <i>tags"), "plain unclosed tags");
    }

    #[test]
    fn empty_document() {
        assert_eq!(html_to_text(""), "");
    }
}
