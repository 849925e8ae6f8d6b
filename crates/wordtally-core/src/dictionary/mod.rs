//! Word dictionaries with aggregate frequency queries.
//!
//! A [`Dictionary`] collects words one [`insert`](Dictionary::insert) at a time
//! and answers four read queries over everything inserted so far:
//!
//! - how often a given word was inserted,
//! - which character was tallied most across all insertions,
//! - every distinct word with its count,
//! - which words share the maximum length.
//!
//! Two interchangeable implementations are provided:
//!
//! - [`TrieDictionary`] stores words in a character trie and caches derived
//!   views until the next insertion.
//! - [`OrderedDictionary`] keeps a single ordered map (longest first, then
//!   case-insensitive alphabetical) and recomputes the letter ranking on
//!   every call.
//!
//! Pick one at runtime with [`Backend::build`].
//!
//! # Example
//!
//! ```
//! use wordtally_core::dictionary::{Backend, Dictionary};
//!
//! let mut dict = Backend::Trie.build();
//! dict.insert("aWord");
//! dict.insert("aWord");
//!
//! assert_eq!(dict.word_frequency("aWord"), 2);
//! assert_eq!(dict.word_frequency("missing"), -1);
//! assert_eq!(&*dict.longest_words(), ["aWord".to_string()]);
//! ```

mod letters;
mod memo;
pub mod ordered;
pub mod trie;
mod word_frequency;

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use letters::{LetterCount, LetterTally, rank_letters};
pub use ordered::OrderedDictionary;
pub use trie::TrieDictionary;
pub use word_frequency::WordFrequency;

/// Sentinel returned by [`Dictionary::word_frequency`] for unknown words.
pub const NOT_FOUND: i64 = -1;

/// Which dictionary implementation to use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Backend {
    /// Character trie with cached query results (default).
    #[default]
    Trie,
    /// Ordered map sorted longest-first, then case-insensitive alphabetical.
    Ordered,
}

impl Backend {
    /// Returns the backend name as used in config files and on the CLI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trie => "trie",
            Self::Ordered => "ordered",
        }
    }

    /// Create an empty dictionary of this kind.
    pub fn build(self) -> Box<dyn Dictionary> {
        match self {
            Self::Trie => Box::new(TrieDictionary::new()),
            Self::Ordered => Box::new(OrderedDictionary::new()),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection of words supporting frequency and length queries.
///
/// `insert` is the only mutator. Every query is total: unknown words, empty
/// input and an empty dictionary produce `None`, [`NOT_FOUND`] or an empty
/// list rather than an error.
pub trait Dictionary {
    /// Which implementation this is.
    fn backend(&self) -> Backend;

    /// Add one occurrence of `word`.
    ///
    /// Empty words are ignored.
    fn insert(&mut self, word: &str);

    /// Number of times `word` was inserted, or `None` if it never was.
    fn frequency(&self, word: &str) -> Option<u64>;

    /// The character with the highest tally across all insertions.
    ///
    /// Ties go to the smallest code point. Returns `None` until something has
    /// been inserted.
    fn most_frequent_letter(&self) -> Option<char>;

    /// Every distinct word with its current count.
    ///
    /// The order is part of each implementation's contract.
    fn word_frequencies(&self) -> Cow<'_, [WordFrequency]>;

    /// All distinct words sharing the maximum length (in characters).
    fn longest_words(&self) -> Cow<'_, [String]>;

    /// Current tally of each character, ranked by count.
    fn letter_counts(&self) -> Cow<'_, [LetterCount]>;

    /// Add one occurrence of `word` if present. `None` is a no-op.
    fn insert_opt(&mut self, word: Option<&str>) {
        if let Some(word) = word {
            self.insert(word);
        }
    }

    /// Insert every word yielded by `words`, returning how many were accepted.
    fn extend_words<'a, I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
        Self: Sized,
    {
        insert_all(self, words)
    }

    /// Frequency of `word`, or [`NOT_FOUND`] for empty or unknown words.
    fn word_frequency(&self, word: &str) -> i64 {
        self.frequency(word)
            .and_then(|count| i64::try_from(count).ok())
            .unwrap_or(NOT_FOUND)
    }

    /// Like [`word_frequency`](Self::word_frequency), treating `None` as unknown.
    fn frequency_opt(&self, word: Option<&str>) -> i64 {
        word.map_or(NOT_FOUND, |w| self.word_frequency(w))
    }

    /// Whether nothing has been inserted yet.
    fn is_empty(&self) -> bool {
        self.most_frequent_letter().is_none()
    }
}

/// Insert every non-empty word from `words`, returning how many were accepted.
///
/// Works on trait objects; [`Dictionary::extend_words`] forwards here.
pub fn insert_all<'a, I>(dict: &mut dyn Dictionary, words: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut accepted = 0;
    for word in words {
        if !word.is_empty() {
            dict.insert(word);
            accepted += 1;
        }
    }
    accepted
}
