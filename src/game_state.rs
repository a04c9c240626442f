use crate::validator::normalize;

/// The state of one round: the root word and every word accepted so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    root_word: String,
    used_words: Vec<String>,
}

impl GameState {
    /// The root word is stored trimmed and lower-cased, the same way
    /// submissions are, so comparisons against it are exact.
    pub fn new(root_word: &str) -> Self {
        Self {
            root_word: normalize(root_word),
            used_words: Vec::new(),
        }
    }

    pub fn root_word(&self) -> &str {
        &self.root_word
    }

    /// Accepted words, most recent first.
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.used_words.iter().any(|w| w == word)
    }

    /// One point per word plus one per letter.
    pub fn score(&self) -> usize {
        self.used_words.len()
            + self
                .used_words
                .iter()
                .map(|w| w.chars().count())
                .sum::<usize>()
    }

    /// Callers are expected to have validated `word` first.
    pub(crate) fn push_front(&mut self, word: String) {
        self.used_words.insert(0, word);
    }
}
