//! Serializable summaries of a dictionary.
//!
//! Reports are snapshots: building one copies what it needs out of the
//! dictionary so it can be printed, serialized or returned from a tool call
//! after the dictionary is gone.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Backend, Dictionary, LetterCount, WordFrequency};

/// Order of the frequency list in a [`DictionaryReport`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FrequencyOrder {
    /// Whatever order the dictionary reports.
    #[default]
    Natural,
    /// Most frequent first; ties alphabetical.
    Count,
    /// Case-insensitive alphabetical.
    Alpha,
}

impl FrequencyOrder {
    /// Returns the order name as used on the CLI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Count => "count",
            Self::Alpha => "alpha",
        }
    }

    fn sort(self, entries: &mut [WordFrequency]) {
        match self {
            Self::Natural => {}
            Self::Count => entries.sort_by(|a, b| {
                b.frequency
                    .cmp(&a.frequency)
                    .then_with(|| a.word.cmp(&b.word))
            }),
            Self::Alpha => entries.sort_by(|a, b| alphabetical(&a.word, &b.word)),
        }
    }
}

impl std::fmt::Display for FrequencyOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Options controlling the frequency list of a [`DictionaryReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Keep only the first `top` entries after ordering.
    pub top: Option<usize>,
    /// How to order entries.
    pub order: FrequencyOrder,
}

/// Everything the dictionary knows, in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DictionaryReport {
    /// Implementation that produced the numbers.
    pub backend: Backend,
    /// Successful insertions (sum of all frequencies).
    pub total_words: u64,
    /// Number of distinct words.
    pub distinct_words: usize,
    /// Character with the highest tally, with that tally.
    pub most_frequent_letter: Option<LetterCount>,
    /// Length in characters of the longest words (0 when empty).
    pub longest_length: usize,
    /// Every word of `longest_length` characters.
    pub longest_words: Vec<String>,
    /// Word counts, ordered and truncated per [`ReportOptions`].
    pub frequencies: Vec<WordFrequency>,
    /// Whether `frequencies` was cut short by `top`.
    pub truncated: bool,
}

impl DictionaryReport {
    /// Summarize `dict`.
    #[tracing::instrument(skip_all, fields(backend = %dict.backend(), top = ?options.top, order = %options.order))]
    pub fn build(dict: &dyn Dictionary, options: &ReportOptions) -> Self {
        let mut frequencies = dict.word_frequencies().into_owned();
        let total_words = frequencies.iter().map(|wf| wf.frequency).sum();
        let distinct_words = frequencies.len();

        options.order.sort(&mut frequencies);
        let truncated = options.top.is_some_and(|top| top < frequencies.len());
        if let Some(top) = options.top {
            frequencies.truncate(top);
        }

        let most_frequent_letter = dict.most_frequent_letter().map(|letter| {
            let count = dict
                .letter_counts()
                .iter()
                .find(|lc| lc.letter == letter)
                .map_or(0, |lc| lc.count);
            LetterCount::new(letter, count)
        });

        let longest_words = dict.longest_words().into_owned();
        let longest_length = longest_words
            .first()
            .map_or(0, |word| word.chars().count());

        tracing::debug!(total_words, distinct_words, "report built");
        Self {
            backend: dict.backend(),
            total_words,
            distinct_words,
            most_frequent_letter,
            longest_length,
            longest_words,
            frequencies,
            truncated,
        }
    }
}

/// Frequency of one looked-up word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LookupEntry {
    /// The word as asked for.
    pub word: String,
    /// Number of insertions, or `-1` when absent.
    pub frequency: i64,
    /// Whether the word was inserted at least once.
    pub found: bool,
}

/// Answers to a batch of frequency lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LookupReport {
    /// Implementation that answered.
    pub backend: Backend,
    /// One entry per requested word, in request order.
    pub entries: Vec<LookupEntry>,
}

impl LookupReport {
    /// Look up each of `words` in `dict`.
    pub fn build<S: AsRef<str>>(dict: &dyn Dictionary, words: &[S]) -> Self {
        let entries = words
            .iter()
            .map(|word| {
                let word = word.as_ref();
                let frequency = dict.word_frequency(word);
                LookupEntry {
                    word: word.to_string(),
                    frequency,
                    found: frequency > 0,
                }
            })
            .collect();
        Self {
            backend: dict.backend(),
            entries,
        }
    }

    /// Whether every requested word was found.
    pub fn all_found(&self) -> bool {
        self.entries.iter().all(|entry| entry.found)
    }
}
