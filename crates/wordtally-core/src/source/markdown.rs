//! Markdown to plain text.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping, so nested code blocks, entities and reference links come out
//! right.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Render markdown as the words a reader would see.
///
/// Removes code (fenced, indented and inline), raw HTML, YAML frontmatter and
/// link destinations. Keeps heading text, link text, list items, blockquotes,
/// table cells and emphasised text without its markers.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn markdown_to_text(text: &str) -> String {
    let body = strip_frontmatter(text);
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut out = String::with_capacity(body.len());
    let mut in_code_block = false;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) if !in_code_block => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push(' '),
            // Block ends must not glue the next block's first word on.
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_)
                | TagEnd::FootnoteDefinition,
            ) => out.push(' '),
            _ => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Skip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_heading_and_paragraph_words() {
        let input = "# Title\n\nSome text.\n\n## Section\n\nMore text.";
        assert_eq!(markdown_to_text(input), "Title Some text. Section More text.");
    }

    #[test]
    fn removes_code_blocks_and_inline_code() {
        let input = "Use `foo()` here.\n\n```rust\nlet x = 1;\n```\n\n    indented code\n\nDone.";
        let result = markdown_to_text(input);
        assert!(!result.contains("foo()"));
        assert!(!result.contains("let x"));
        assert!(!result.contains("indented"));
        assert!(result.contains("Use"));
        assert!(result.contains("Done."));
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\nstatus: accepted\n---\n\nBody text.";
        assert_eq!(markdown_to_text(input), "Body text.");
    }

    #[test]
    fn keeps_link_text_but_not_destination() {
        let result = markdown_to_text("See [the docs](https://example.com/docs).");
        assert_eq!(result, "See the docs.");
    }

    #[test]
    fn strips_emphasis_markers() {
        assert_eq!(
            markdown_to_text("This is **bold** and *italic*."),
            "This is bold and italic."
        );
    }

    #[test]
    fn list_items_and_cells_stay_separate() {
        assert_eq!(markdown_to_text("- one\n- two\n"), "one two");
        assert_eq!(
            markdown_to_text("| a | b |\n|---|---|\n| c | d |\n"),
            "a b c d"
        );
    }

    #[test]
    fn unterminated_frontmatter_is_text() {
        assert_eq!(strip_frontmatter("---\nnot closed"), "---\nnot closed");
    }

    #[test]
    fn empty_input() {
        assert!(markdown_to_text("").is_empty());
    }
}
