use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A word paired with the number of times it was inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    /// The word, exactly as inserted.
    pub word: String,
    /// Number of insertions (always at least 1).
    pub frequency: u64,
}

impl WordFrequency {
    /// Pair `word` with `frequency`.
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

impl std::fmt::Display for WordFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.word, self.frequency)
    }
}
