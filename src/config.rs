//! Resolves command line options against the per-user data and cache
//! directories.

use crate::cli::Cli;
use crate::dictionary::{DictionaryError, LANGUAGE, WordListDictionary};
use crate::wordbank::{EmbeddedWordList, FileWordList, WordListSource};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "word-scramble";
pub const WORDS_FILE: &str = "start.txt";
pub const DICTIONARY_FILE: &str = "dictionary.txt";
pub const LOG_FILE: &str = "word-scramble.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` selects the embedded root word list.
    pub words_path: Option<PathBuf>,
    /// `None` selects the embedded dictionary.
    pub dictionary_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub plain: bool,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

impl Config {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, dirs::data_dir().as_deref(), dirs::cache_dir().as_deref())
    }

    /// Explicit options win; otherwise use files in `data_dir` that exist.
    pub fn resolve(cli: &Cli, data_dir: Option<&Path>, cache_dir: Option<&Path>) -> Self {
        let user_file = |name: &str| {
            data_dir
                .map(|dir| dir.join(APP_DIR).join(name))
                .filter(|path| path.is_file())
        };

        Self {
            words_path: cli.words_path.clone().or_else(|| user_file(WORDS_FILE)),
            dictionary_path: cli
                .dictionary_path
                .clone()
                .or_else(|| user_file(DICTIONARY_FILE)),
            seed: cli.seed,
            plain: cli.plain,
            log_file: cli
                .log_file
                .clone()
                .or_else(|| cache_dir.map(|dir| dir.join(APP_DIR).join(LOG_FILE))),
        }
    }

    pub fn word_source(&self) -> Box<dyn WordListSource> {
        match &self.words_path {
            Some(path) => Box::new(FileWordList::new(path)),
            None => Box::new(EmbeddedWordList),
        }
    }

    /// # Errors
    ///
    /// Fails if a configured dictionary file cannot be loaded.
    pub fn dictionary(&self) -> Result<WordListDictionary, DictionaryError> {
        match &self.dictionary_path {
            Some(path) => WordListDictionary::from_file(LANGUAGE, path),
            None => Ok(WordListDictionary::embedded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_user_files() {
        let data = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();

        let config = Config::resolve(&Cli::default(), Some(data.path()), Some(cache.path()));

        assert_eq!(config.words_path, None);
        assert_eq!(config.dictionary_path, None);
        assert_eq!(
            config.log_file,
            Some(cache.path().join(APP_DIR).join(LOG_FILE))
        );
        assert!(!config.plain);
    }

    #[test]
    fn test_user_files_are_picked_up() {
        let data = tempfile::tempdir().unwrap();
        let app_dir = data.path().join(APP_DIR);
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join(WORDS_FILE), "scramble\n").unwrap();
        fs::write(app_dir.join(DICTIONARY_FILE), "cable\n").unwrap();

        let config = Config::resolve(&Cli::default(), Some(data.path()), None);

        assert_eq!(config.words_path, Some(app_dir.join(WORDS_FILE)));
        assert_eq!(config.dictionary_path, Some(app_dir.join(DICTIONARY_FILE)));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_explicit_options_win() {
        let data = tempfile::tempdir().unwrap();
        let app_dir = data.path().join(APP_DIR);
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join(WORDS_FILE), "scramble\n").unwrap();

        let cli = Cli {
            words_path: Some(PathBuf::from("mine.txt")),
            seed: Some(3),
            plain: true,
            log_file: Some(PathBuf::from("game.log")),
            ..Cli::default()
        };
        let config = Config::resolve(&cli, Some(data.path()), None);

        assert_eq!(config.words_path, Some(PathBuf::from("mine.txt")));
        assert_eq!(config.seed, Some(3));
        assert!(config.plain);
        assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_dictionary_and_source_selection() {
        let config = Config::resolve(&Cli::default(), None, None);
        assert!(config.dictionary().unwrap().len() > 1000);
        assert!(config.word_source().fetch().unwrap().is_some());

        let missing = Config {
            words_path: Some(PathBuf::from("/nonexistent/start.txt")),
            dictionary_path: Some(PathBuf::from("/nonexistent/dictionary.txt")),
            ..config
        };
        assert!(missing.word_source().fetch().unwrap().is_none());
        assert!(missing.dictionary().is_err());
    }
}
