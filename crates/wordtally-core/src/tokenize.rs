//! Splitting plain text into words.
//!
//! A word is a maximal run of Unicode word characters (letters, marks,
//! digits, connector punctuation such as `_`) or apostrophes. Everything else
//! separates words and is dropped, so "sugar-free" yields "sugar" and "free".

use regex::Regex;
use std::sync::LazyLock;

/// Maximal runs of word characters or apostrophes. `\w` is Unicode-aware.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+").expect("valid regex"));

/// Iterate over the words of `text` in order of appearance.
///
/// Borrowed from `text`; nothing is allocated per word. Empty and
/// whitespace-only input yields nothing.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Collect the words of `text` into owned strings.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<String> {
    words(text).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_punctuation() {
        assert_eq!(
            tokenize("Hello, world! How are you?"),
            vec!["Hello", "world", "How", "are", "you"]
        );
    }

    #[test]
    fn keeps_apostrophes_inside_words() {
        assert_eq!(tokenize("don't stop"), vec!["don't", "stop"]);
        assert_eq!(tokenize("'quoted'"), vec!["'quoted'"]);
    }

    #[test]
    fn hyphen_separates_words() {
        assert_eq!(tokenize("sugar-free"), vec!["sugar", "free"]);
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(tokenize("snake_case 42 x2"), vec!["snake_case", "42", "x2"]);
    }

    #[test]
    fn matches_unicode_letters() {
        assert_eq!(
            tokenize("Příliš žluťoučký kůň"),
            vec!["Příliš", "žluťoučký", "kůň"]
        );
        assert_eq!(tokenize("日本語 テキスト"), vec!["日本語", "テキスト"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("... !!! ---").is_empty());
    }

    #[test]
    fn words_borrows_from_input() {
        let text = String::from("one two");
        let collected: Vec<&str> = words(&text).collect();
        assert_eq!(collected, vec!["one", "two"]);
    }
}
