use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_ROOT_WORDS: &str = include_str!("resources/start.txt");

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word list {path} is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },
}

/// Supplies the raw, newline-separated list of root words.
///
/// `Ok(None)` means the list is unavailable and the caller should use its
/// fallback word. An `Err` is reserved for a list that exists but cannot be
/// read at all.
pub trait WordListSource {
    fn fetch(&self) -> Result<Option<String>, WordListError>;
}

/// The root word list compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordList;

impl WordListSource for EmbeddedWordList {
    fn fetch(&self) -> Result<Option<String>, WordListError> {
        Ok(Some(EMBEDDED_ROOT_WORDS.to_string()))
    }
}

/// A root word list read from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileWordList {
    path: PathBuf,
}

impl FileWordList {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordListSource for FileWordList {
    fn fetch(&self) -> Result<Option<String>, WordListError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Word list {} not found", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(WordListError::Unreadable {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| WordListError::InvalidEncoding {
                path: self.path.clone(),
            })
    }
}

impl WordListSource for String {
    fn fetch(&self) -> Result<Option<String>, WordListError> {
        Ok(Some(self.clone()))
    }
}

impl WordListSource for Option<String> {
    fn fetch(&self) -> Result<Option<String>, WordListError> {
        Ok(self.clone())
    }
}

impl<W: WordListSource + ?Sized> WordListSource for Box<W> {
    fn fetch(&self) -> Result<Option<String>, WordListError> {
        (**self).fetch()
    }
}

/// Split a word list into lower-case root words, skipping blank lines.
pub fn parse_root_words(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}
