//! Per-character tallies and their ranked view.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A character with its cumulative tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LetterCount {
    /// The character.
    pub letter: char,
    /// How many times it appeared across all insertions.
    pub count: u64,
}

impl LetterCount {
    /// Pair `letter` with `count`.
    pub const fn new(letter: char, count: u64) -> Self {
        Self { letter, count }
    }
}

/// Running count of every character seen in inserted words.
///
/// Each insertion tallies every character it contains, so inserting the same
/// word twice counts its letters twice.
#[derive(Debug, Clone, Default)]
pub struct LetterTally {
    counts: HashMap<char, u64>,
}

impl LetterTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a single character.
    pub fn record(&mut self, letter: char) {
        *self.counts.entry(letter).or_insert(0) += 1;
    }

    /// Tally every character of `word`.
    pub fn record_word(&mut self, word: &str) {
        for letter in word.chars() {
            self.record(letter);
        }
    }

    /// The tally sorted by [`rank_letters`].
    pub fn ranked(&self) -> Vec<LetterCount> {
        rank_letters(&self.counts)
    }
}

/// Sort a tally by count descending, breaking ties on the smaller code point.
///
/// The tie-break keeps the result independent of hash map iteration order.
pub fn rank_letters(counts: &HashMap<char, u64>) -> Vec<LetterCount> {
    let mut ranked: Vec<LetterCount> = counts
        .iter()
        .map(|(&letter, &count)| LetterCount::new(letter, count))
        .collect();
    ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.letter.cmp(&b.letter)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_ranks_to_nothing() {
        assert!(LetterTally::new().ranked().is_empty());
    }

    #[test]
    fn counts_every_occurrence() {
        let mut tally = LetterTally::new();
        tally.record_word("banana");
        tally.record_word("banana");
        assert_eq!(
            tally.ranked(),
            vec![
                LetterCount::new('a', 6),
                LetterCount::new('n', 4),
                LetterCount::new('b', 2),
            ]
        );
    }

    #[test]
    fn ranks_by_count_then_code_point() {
        let mut tally = LetterTally::new();
        tally.record_word("zzyyx");
        assert_eq!(
            tally.ranked(),
            vec![
                LetterCount::new('y', 2),
                LetterCount::new('z', 2),
                LetterCount::new('x', 1),
            ]
        );
    }

    #[test]
    fn handles_non_ascii_letters() {
        let mut tally = LetterTally::new();
        tally.record_word("żółć");
        tally.record_word("ż");
        assert_eq!(tally.ranked()[0], LetterCount::new('ż', 2));
    }
}
