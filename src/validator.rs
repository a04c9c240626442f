//! Checks a submitted word against the current round.
//!
//! Checks run in a fixed order and the first failure is reported, so the
//! player always sees the most relevant complaint.

use crate::dictionary::{DictionaryOracle, LANGUAGE};
use crate::game_state::GameState;
use std::collections::HashMap;
use thiserror::Error;

pub const MIN_WORD_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}: {}", self.title(), self.message())]
    ReusedWord,
    #[error("{}: {}", self.title(), self.message())]
    TooShort,
    #[error("{}: {}", self.title(), self.message())]
    Empty,
    #[error("{}: {}", self.title(), self.message())]
    AlreadyUsed,
    #[error("{}: {}", self.title(), self.message())]
    NotPossible { word: String, root: String },
    #[error("{}: {}", self.title(), self.message())]
    NotReal,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ReusedWord => "Reused word",
            Self::TooShort => "Too short",
            Self::Empty => "Empty word",
            Self::AlreadyUsed => "Word used already",
            Self::NotPossible { .. } => "Word not possible",
            Self::NotReal => "Word not recognized",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::ReusedWord => {
                "You can't just take the given word and make it look like your own".to_string()
            }
            Self::TooShort => {
                "You need at least three characters to build a word in this game".to_string()
            }
            Self::Empty => "That's just empty!".to_string(),
            Self::AlreadyUsed => "Be more original!".to_string(),
            Self::NotPossible { word, root } => format!("You can't spell '{word}' from '{root}'"),
            Self::NotReal => "You can't just make them up, you know!".to_string(),
        }
    }
}

pub fn normalize(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

pub fn is_original(word: &str, state: &GameState) -> bool {
    !state.contains(word)
}

/// True if every letter of `word` can be taken from `root`, each letter of
/// `root` used at most once.
pub fn is_possible(word: &str, root: &str) -> bool {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in root.chars() {
        *available.entry(c).or_insert(0) += 1;
    }
    word.chars().all(|c| match available.get_mut(&c) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}

pub fn is_real<D: DictionaryOracle + ?Sized>(word: &str, oracle: &D) -> bool {
    oracle.is_recognized_word(word, LANGUAGE)
}

/// Validate `candidate` for `state`, returning the normalized word to store.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies. The dictionary is only
/// consulted once every cheaper check has passed.
pub fn validate<D: DictionaryOracle + ?Sized>(
    candidate: &str,
    state: &GameState,
    oracle: &D,
) -> Result<String, ValidationError> {
    let word = normalize(candidate);
    let length = word.chars().count();

    if word == state.root_word() {
        return Err(ValidationError::ReusedWord);
    }
    if length < MIN_WORD_LENGTH {
        return Err(ValidationError::TooShort);
    }
    // Unreachable while MIN_WORD_LENGTH > 0
    if length == 0 {
        return Err(ValidationError::Empty);
    }
    if !is_original(&word, state) {
        return Err(ValidationError::AlreadyUsed);
    }
    if !is_possible(&word, state.root_word()) {
        return Err(ValidationError::NotPossible {
            word,
            root: state.root_word().to_string(),
        });
    }
    if !is_real(&word, oracle) {
        return Err(ValidationError::NotReal);
    }
    Ok(word)
}
