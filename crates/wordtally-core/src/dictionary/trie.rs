//! Trie-backed dictionary.
//!
//! Nodes live in a single `Vec` and refer to their children by index. The
//! first characters of all words hang off a sentinel node at index 0 that is
//! never itself a word. Each node counts how many times the path leading to
//! it was inserted as a complete word; a count of zero marks a path that is
//! only a prefix.
//!
//! Derived views (the ranked letter tally, the frequency list and the longest
//! words) are computed on first read and cached until the next successful
//! insert.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::letters::{LetterCount, LetterTally};
use super::memo::Memo;
use super::{Backend, Dictionary, WordFrequency};

/// Index of a node in the arena.
type NodeId = usize;

/// The sentinel parent of every first character.
const SENTINEL: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Times this path was inserted as a whole word; 0 for pure prefixes.
    terminal_count: u64,
    children: BTreeMap<char, NodeId>,
}

/// A [`Dictionary`] stored as a character trie.
///
/// [`word_frequencies`](Dictionary::word_frequencies) lists words in code
/// point order, with every word before its extensions ("tea" before "team").
#[derive(Debug, Clone)]
pub struct TrieDictionary {
    nodes: Vec<TrieNode>,
    letters: LetterTally,
    ranked_letters: Memo<Vec<LetterCount>>,
    frequencies: Memo<Vec<WordFrequency>>,
    longest: Memo<Vec<String>>,
}

impl TrieDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            letters: LetterTally::new(),
            ranked_letters: Memo::new(),
            frequencies: Memo::new(),
            longest: Memo::new(),
        }
    }

    /// Number of trie nodes, excluding the sentinel.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether `prefix` is the beginning of at least one inserted word.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.find(prefix).is_some()
    }

    fn child_or_insert(&mut self, parent: NodeId, letter: char) -> NodeId {
        if let Some(&child) = self.nodes[parent].children.get(&letter) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(TrieNode::default());
        self.nodes[parent].children.insert(letter, child);
        child
    }

    fn find(&self, word: &str) -> Option<NodeId> {
        word.chars()
            .try_fold(SENTINEL, |node, letter| {
                self.nodes[node].children.get(&letter).copied()
            })
    }

    fn invalidate(&mut self) {
        self.ranked_letters.invalidate();
        self.frequencies.invalidate();
        self.longest.invalidate();
    }

    /// Depth-first preorder walk over every node below the sentinel.
    ///
    /// `visit` receives the characters on the path to the node (so the path
    /// length is the node's depth) and the node itself. Siblings are visited
    /// in code point order. Uses an explicit stack rather than recursion.
    fn walk(&self, mut visit: impl FnMut(&[char], &TrieNode)) {
        let mut path: Vec<char> = Vec::new();
        let mut stack: Vec<(NodeId, usize, char)> = self.nodes[SENTINEL]
            .children
            .iter()
            .rev()
            .map(|(&letter, &child)| (child, 0, letter))
            .collect();

        while let Some((id, depth, letter)) = stack.pop() {
            path.truncate(depth);
            path.push(letter);

            let node = &self.nodes[id];
            visit(&path, node);

            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|(&next, &child)| (child, depth + 1, next)),
            );
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(nodes = self.node_count()))]
    fn collect_frequencies(&self) -> Vec<WordFrequency> {
        let mut found = Vec::new();
        self.walk(|path, node| {
            if node.terminal_count > 0 {
                found.push(WordFrequency::new(
                    path.iter().collect::<String>(),
                    node.terminal_count,
                ));
            }
        });
        found
    }

    #[tracing::instrument(level = "trace", skip_all, fields(nodes = self.node_count()))]
    fn collect_longest(&self) -> Vec<String> {
        let mut max_depth = 0;
        let mut longest = Vec::new();
        self.walk(|path, node| {
            if node.terminal_count == 0 {
                return;
            }
            let depth = path.len();
            if depth > max_depth {
                max_depth = depth;
                longest.clear();
            }
            if depth == max_depth {
                longest.push(path.iter().collect());
            }
        });
        longest
    }
}

impl Default for TrieDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for TrieDictionary {
    fn backend(&self) -> Backend {
        Backend::Trie
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = SENTINEL;
        for letter in word.chars() {
            self.letters.record(letter);
            node = self.child_or_insert(node, letter);
        }
        self.nodes[node].terminal_count += 1;
        self.invalidate();
    }

    fn frequency(&self, word: &str) -> Option<u64> {
        if word.is_empty() {
            return None;
        }
        self.find(word)
            .map(|id| self.nodes[id].terminal_count)
            .filter(|&count| count > 0)
    }

    fn most_frequent_letter(&self) -> Option<char> {
        self.letter_counts().first().map(|lc| lc.letter)
    }

    fn word_frequencies(&self) -> Cow<'_, [WordFrequency]> {
        Cow::Borrowed(self.frequencies.get_or_compute(|| self.collect_frequencies()))
    }

    fn longest_words(&self) -> Cow<'_, [String]> {
        Cow::Borrowed(self.longest.get_or_compute(|| self.collect_longest()))
    }

    fn letter_counts(&self) -> Cow<'_, [LetterCount]> {
        Cow::Borrowed(self.ranked_letters.get_or_compute(|| self.letters.ranked()))
    }

    fn is_empty(&self) -> bool {
        self.nodes[SENTINEL].children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(words: &[&str]) -> TrieDictionary {
        let mut dict = TrieDictionary::new();
        for word in words {
            dict.insert(word);
        }
        dict
    }

    #[test]
    fn prefix_only_paths_are_not_found() {
        let dict = trie(&["longestWord"]);
        assert!(dict.contains_prefix("long"));
        assert_eq!(dict.frequency("long"), None);
        assert_eq!(dict.word_frequency("long"), -1);
        assert_eq!(dict.word_frequency("longestWords"), -1);
    }

    #[test]
    fn prefix_becomes_word_when_inserted() {
        let mut dict = trie(&["team"]);
        assert_eq!(dict.frequency("tea"), None);
        dict.insert("tea");
        assert_eq!(dict.frequency("tea"), Some(1));
        assert_eq!(dict.frequency("team"), Some(1));
        assert_eq!(dict.node_count(), 4);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let dict = trie(&["tea", "ten", "to"]);
        // t, e, a, n, o
        assert_eq!(dict.node_count(), 5);
    }

    #[test]
    fn frequencies_come_in_code_point_order() {
        let dict = trie(&["team", "b", "tea", "Zed", "tea", "apple"]);
        let frequencies = dict.word_frequencies();
        let words: Vec<(&str, u64)> = frequencies
            .iter()
            .map(|wf| (wf.word.as_str(), wf.frequency))
            .collect();
        assert_eq!(
            words,
            vec![("Zed", 1), ("apple", 1), ("b", 1), ("tea", 2), ("team", 1)]
        );
    }

    #[test]
    fn single_character_root_words_are_listed() {
        let dict = trie(&["a", "ab", "a"]);
        assert_eq!(
            &*dict.word_frequencies(),
            [WordFrequency::new("a", 2), WordFrequency::new("ab", 1)]
        );
        assert_eq!(&*dict.longest_words(), ["ab".to_string()]);
    }

    #[test]
    fn deeper_candidate_replaces_shallower_ones() {
        // "bb" and "cc" are collected before "zzz" is reached.
        let dict = trie(&["bb", "cc", "zzz", "a"]);
        assert_eq!(&*dict.longest_words(), ["zzz".to_string()]);
    }

    #[test]
    fn caches_fill_on_read_and_clear_on_insert() {
        let mut dict = trie(&["aWord"]);
        assert!(!dict.frequencies.is_cached());

        let _ = dict.word_frequencies();
        let _ = dict.longest_words();
        let _ = dict.most_frequent_letter();
        assert!(dict.frequencies.is_cached());
        assert!(dict.longest.is_cached());
        assert!(dict.ranked_letters.is_cached());

        dict.insert("longerWord");
        assert!(!dict.frequencies.is_cached());
        assert!(!dict.longest.is_cached());
        assert!(!dict.ranked_letters.is_cached());
        assert_eq!(&*dict.longest_words(), ["longerWord".to_string()]);
        assert_eq!(dict.word_frequencies().len(), 2);
    }

    #[test]
    fn empty_insert_keeps_caches() {
        let mut dict = trie(&["aWord"]);
        let _ = dict.word_frequencies();
        dict.insert("");
        assert!(dict.frequencies.is_cached());
    }

    #[test]
    fn repeated_reads_return_the_cached_slice() {
        let dict = trie(&["one", "two", "three"]);
        let first = dict.word_frequencies();
        let second = dict.word_frequencies();
        assert!(std::ptr::eq(&*first, &*second));
    }

    #[test]
    fn empty_trie() {
        let dict = TrieDictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.node_count(), 0);
        assert!(!dict.contains_prefix(""));
        assert!(dict.word_frequencies().is_empty());
        assert!(dict.longest_words().is_empty());
        assert_eq!(dict.most_frequent_letter(), None);
    }
}
