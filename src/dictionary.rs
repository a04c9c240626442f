//! Dictionary lookups used to decide whether a submission is a real word.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// Language tag every lookup in the game is made with.
pub const LANGUAGE: &str = "en";

/// Something that can tell whether a word exists in a given language.
pub trait DictionaryOracle {
    fn is_recognized_word(&self, word: &str, language: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("dictionary {path} contains no words")]
    Empty { path: PathBuf },
}

/// A dictionary for a single language, backed by a set of lower-case words.
#[derive(Debug, Clone)]
pub struct WordListDictionary {
    language: String,
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn from_text(language: &str, data: &str) -> Self {
        let words = data
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self {
            language: language.to_string(),
            words,
        }
    }

    /// The English word list compiled into the binary.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_text(LANGUAGE, EMBEDDED_DICTIONARY)
    }

    /// Load a newline-separated word list from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read as UTF-8 or holds no words.
    pub fn from_file<P: AsRef<Path>>(language: &str, path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_text(language, &data);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(dictionary)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl DictionaryOracle for WordListDictionary {
    fn is_recognized_word(&self, word: &str, language: &str) -> bool {
        language.eq_ignore_ascii_case(&self.language) && self.words.contains(&word.to_lowercase())
    }
}

impl DictionaryOracle for HashSet<String> {
    fn is_recognized_word(&self, word: &str, _language: &str) -> bool {
        self.contains(word)
    }
}

impl<D: DictionaryOracle + ?Sized> DictionaryOracle for Box<D> {
    fn is_recognized_word(&self, word: &str, language: &str) -> bool {
        (**self).is_recognized_word(word, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_text_normalizes_entries() {
        let dictionary = WordListDictionary::from_text("en", "  Cable\nAMBLE\n\n  \nscam\n");
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.is_recognized_word("cable", "en"));
        assert!(dictionary.is_recognized_word("amble", "en"));
        assert!(!dictionary.is_recognized_word("", "en"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dictionary = WordListDictionary::from_text("en", "cable");
        assert!(dictionary.is_recognized_word("CaBlE", "en"));
        assert!(dictionary.is_recognized_word("cable", "EN"));
    }

    #[test]
    fn test_other_language_not_recognized() {
        let dictionary = WordListDictionary::from_text("en", "cable");
        assert!(!dictionary.is_recognized_word("cable", "de"));
    }

    #[test]
    fn test_embedded_dictionary_contents() {
        let dictionary = WordListDictionary::embedded();
        assert_eq!(dictionary.language(), LANGUAGE);
        assert!(dictionary.len() > 1000);
        for word in ["cable", "scramble", "silkworm", "milk", "blame"] {
            assert!(dictionary.is_recognized_word(word, LANGUAGE), "{word} missing");
        }
        assert!(!dictionary.is_recognized_word("zzzzz", LANGUAGE));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "amble\nramble").unwrap();

        let dictionary = WordListDictionary::from_file("en", file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.is_recognized_word("ramble", "en"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = WordListDictionary::from_file("en", "/nonexistent/dictionary.txt");
        assert!(matches!(result, Err(DictionaryError::Read { .. })));
    }

    #[test]
    fn test_from_file_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = WordListDictionary::from_file("en", file.path());
        assert!(matches!(result, Err(DictionaryError::Empty { .. })));
    }

    #[test]
    fn test_hash_set_oracle() {
        let words: HashSet<String> = ["cable".to_string()].into_iter().collect();
        assert!(words.is_recognized_word("cable", LANGUAGE));
        assert!(!words.is_recognized_word("cables", LANGUAGE));
    }
}
