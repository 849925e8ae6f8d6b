//! Ordered-map dictionary.
//!
//! All words live in one [`BTreeMap`] whose key order puts the longest words
//! first and sorts equal lengths case-insensitively. Listing frequencies is a
//! plain in-order iteration and the longest words are the leading run of
//! equal-length keys.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::letters::{LetterCount, LetterTally};
use super::{Backend, Dictionary, WordFrequency};

/// Map key ordering words by length descending, then case-insensitively.
///
/// Words that differ only in case compare by code point as a final step, so
/// "Word" and "word" stay separate entries.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WordKey {
    len: usize,
    folded: String,
    word: String,
}

impl WordKey {
    fn new(word: &str) -> Self {
        Self {
            len: word.chars().count(),
            folded: word.to_lowercase(),
            word: word.to_string(),
        }
    }
}

impl Ord for WordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .len
            .cmp(&self.len)
            .then_with(|| self.folded.cmp(&other.folded))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for WordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A [`Dictionary`] backed by a sorted map.
///
/// [`word_frequencies`](Dictionary::word_frequencies) lists the longest words
/// first; words of equal length are in case-insensitive alphabetical order.
/// The letter ranking is rebuilt on every query.
#[derive(Debug, Clone, Default)]
pub struct OrderedDictionary {
    words: BTreeMap<WordKey, u64>,
    letters: LetterTally,
}

impl OrderedDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dictionary for OrderedDictionary {
    fn backend(&self) -> Backend {
        Backend::Ordered
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        *self.words.entry(WordKey::new(word)).or_insert(0) += 1;
        self.letters.record_word(word);
    }

    fn frequency(&self, word: &str) -> Option<u64> {
        if word.is_empty() {
            return None;
        }
        self.words.get(&WordKey::new(word)).copied()
    }

    fn most_frequent_letter(&self) -> Option<char> {
        self.letters.ranked().first().map(|lc| lc.letter)
    }

    fn word_frequencies(&self) -> Cow<'_, [WordFrequency]> {
        self.words
            .iter()
            .map(|(key, &count)| WordFrequency::new(key.word.as_str(), count))
            .collect()
    }

    fn longest_words(&self) -> Cow<'_, [String]> {
        let Some(max) = self.words.keys().next().map(|key| key.len) else {
            return Cow::Owned(Vec::new());
        };
        self.words
            .keys()
            .take_while(|key| key.len == max)
            .map(|key| key.word.clone())
            .collect()
    }

    fn letter_counts(&self) -> Cow<'_, [LetterCount]> {
        Cow::Owned(self.letters.ranked())
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered(words: &[&str]) -> OrderedDictionary {
        let mut dict = OrderedDictionary::new();
        for word in words {
            dict.insert(word);
        }
        dict
    }

    fn listed(dict: &OrderedDictionary) -> Vec<(String, u64)> {
        dict.word_frequencies()
            .iter()
            .map(|wf| (wf.word.clone(), wf.frequency))
            .collect()
    }

    #[test]
    fn key_orders_longest_first() {
        let mut keys = vec![
            WordKey::new("bb"),
            WordKey::new("a"),
            WordKey::new("ccc"),
        ];
        keys.sort();
        let words: Vec<&str> = keys.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["ccc", "bb", "a"]);
    }

    #[test]
    fn key_ignores_case_before_code_point() {
        // Plain code point order would put "Zebra" before "apple".
        assert!(WordKey::new("apple") < WordKey::new("Zebra"));
        assert!(WordKey::new("Word") < WordKey::new("word"));
        assert_ne!(WordKey::new("Word"), WordKey::new("word"));
    }

    #[test]
    fn key_length_counts_characters() {
        assert_eq!(WordKey::new("żółw").len, 4);
        assert!(WordKey::new("żółwie") < WordKey::new("abcde"));
    }

    #[test]
    fn frequencies_come_longest_first_then_alphabetical() {
        let dict = ordered(&["aWord", "longerWord", "aWord", "Bravo", "alpha"]);
        assert_eq!(
            listed(&dict),
            vec![
                ("longerWord".to_string(), 1),
                ("alpha".to_string(), 1),
                ("aWord".to_string(), 2),
                ("Bravo".to_string(), 1),
            ]
        );
    }

    #[test]
    fn frequencies_reorder_as_words_arrive() {
        let mut dict = ordered(&["aWord"]);
        assert_eq!(listed(&dict), vec![("aWord".to_string(), 1)]);

        dict.insert("longerWord");
        dict.insert("aWord");
        assert_eq!(
            listed(&dict),
            vec![("longerWord".to_string(), 1), ("aWord".to_string(), 2)]
        );

        dict.insert("longestWord");
        assert_eq!(dict.word_frequencies().len(), 3);
        assert_eq!(dict.word_frequencies()[0].word, "longestWord");
    }

    #[test]
    fn longest_words_are_the_leading_run() {
        let dict = ordered(&["sugar_free", "aWord", "longerWord", "ssssssssss"]);
        assert_eq!(
            &*dict.longest_words(),
            [
                "longerWord".to_string(),
                "ssssssssss".to_string(),
                "sugar_free".to_string(),
            ]
        );
    }

    #[test]
    fn empty_dictionary() {
        let dict = OrderedDictionary::new();
        assert!(dict.is_empty());
        assert!(dict.longest_words().is_empty());
        assert!(dict.word_frequencies().is_empty());
        assert_eq!(dict.most_frequent_letter(), None);
    }
}
