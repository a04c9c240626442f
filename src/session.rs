use crate::dictionary::DictionaryOracle;
use crate::game_state::GameState;
use crate::validator::{ValidationError, validate};
use crate::wordbank::{WordListError, WordListSource, parse_root_words};
use crate::{debug_log, info_log};
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Root word used when the word list is missing or has no entries.
pub const FALLBACK_ROOT_WORD: &str = "silkworm";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not load root words: {0}")]
    WordList(#[from] WordListError),
}

/// Owns the running game and everything needed to start and play it.
pub struct Session<D, W> {
    dictionary: D,
    source: W,
    rng: StdRng,
    state: GameState,
}

impl<D: DictionaryOracle, W: WordListSource> Session<D, W> {
    /// Create a session with an OS-seeded RNG and start the first round.
    ///
    /// # Errors
    ///
    /// Fails if the word list exists but cannot be read.
    pub fn new(dictionary: D, source: W) -> Result<Self, SessionError> {
        Self::with_rng(dictionary, source, StdRng::from_os_rng())
    }

    /// Like [`Session::new`], but root word selection is reproducible.
    ///
    /// # Errors
    ///
    /// Fails if the word list exists but cannot be read.
    pub fn with_seed(dictionary: D, source: W, seed: u64) -> Result<Self, SessionError> {
        Self::with_rng(dictionary, source, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dictionary: D, source: W, rng: StdRng) -> Result<Self, SessionError> {
        let mut session = Self {
            dictionary,
            source,
            rng,
            state: GameState::new(FALLBACK_ROOT_WORD),
        };
        session.start_session()?;
        Ok(session)
    }

    /// Pick a new root word and clear the accepted words.
    ///
    /// On error the current round is left untouched.
    ///
    /// # Errors
    ///
    /// Fails if the word list exists but cannot be read.
    pub fn start_session(&mut self) -> Result<&str, SessionError> {
        let root_word = match self.source.fetch()? {
            Some(data) => {
                let words = parse_root_words(&data);
                debug_log!("start_session() - {} candidate root words", words.len());
                words.choose(&mut self.rng).cloned().unwrap_or_else(|| {
                    warn!("Word list is empty, using fallback root word");
                    FALLBACK_ROOT_WORD.to_string()
                })
            }
            None => {
                warn!("Word list unavailable, using fallback root word");
                FALLBACK_ROOT_WORD.to_string()
            }
        };
        info_log!("start_session() - New root word: '{}'", root_word);
        self.state = GameState::new(&root_word);
        Ok(self.state.root_word())
    }

    /// Validate `raw` and, if accepted, put it at the front of the word list.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the state is unchanged in that case.
    pub fn submit_word(&mut self, raw: &str) -> Result<String, ValidationError> {
        match validate(raw, &self.state, &self.dictionary) {
            Ok(word) => {
                info_log!("submit_word() - Accepted '{}'", word);
                self.state.push_front(word.clone());
                Ok(word)
            }
            Err(e) => {
                debug_log!("submit_word() - Rejected '{}': {}", raw, e);
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn root_word(&self) -> &str {
        self.state.root_word()
    }

    pub fn used_words(&self) -> &[String] {
        self.state.used_words()
    }

    pub fn score(&self) -> usize {
        self.state.score()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(String),
    NewGame,
    Exit,
}

/// Presentation layer driven by [`game_loop`].
pub trait GameInterface {
    fn display_new_game(&mut self, state: &GameState);
    /// `None` means nothing actionable was entered; the loop asks again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_accepted(&mut self, word: &str, state: &GameState);
    fn display_rejected(&mut self, error: &ValidationError);
    fn display_session_error(&mut self, error: &SessionError);
    fn display_exit_message(&mut self);
}

pub fn game_loop<D, W, I>(session: &mut Session<D, W>, interface: &mut I)
where
    D: DictionaryOracle,
    W: WordListSource,
    I: GameInterface + ?Sized,
{
    interface.display_new_game(session.state());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => match session.start_session() {
                Ok(_) => interface.display_new_game(session.state()),
                Err(e) => interface.display_session_error(&e),
            },
            UserAction::Submit(raw) => match session.submit_word(&raw) {
                Ok(word) => interface.display_accepted(&word, session.state()),
                Err(e) => interface.display_rejected(&e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordListDictionary;
    use crate::wordbank::EmbeddedWordList;
    use std::cell::Cell;
    use std::collections::{HashSet, VecDeque};

    fn dictionary() -> HashSet<String> {
        ["cable", "amble", "blame", "scam", "crab", "zzzzz"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn scramble_session() -> Session<HashSet<String>, String> {
        Session::with_seed(dictionary(), "scramble\n".to_string(), 7).unwrap()
    }

    /// Succeeds on the first fetch and fails on every later one.
    struct FailsAfterFirst {
        fetched: Cell<bool>,
    }

    impl WordListSource for FailsAfterFirst {
        fn fetch(&self) -> Result<Option<String>, WordListError> {
            if self.fetched.replace(true) {
                Err(WordListError::InvalidEncoding {
                    path: "start.txt".into(),
                })
            } else {
                Ok(Some("scramble".to_string()))
            }
        }
    }

    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        new_games: Vec<String>,
        accepted: Vec<(String, usize)>,
        rejected: Vec<ValidationError>,
        session_errors: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_new_game(&mut self, state: &GameState) {
            self.new_games.push(state.root_word().to_string());
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_accepted(&mut self, word: &str, state: &GameState) {
            self.accepted.push((word.to_string(), state.score()));
        }

        fn display_rejected(&mut self, error: &ValidationError) {
            self.rejected.push(error.clone());
        }

        fn display_session_error(&mut self, _error: &SessionError) {
            self.session_errors += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_start_session_picks_from_list() {
        let words = "scramble\nsilkworm\nabsolute\n".to_string();
        let session = Session::with_seed(dictionary(), words, 1).unwrap();
        assert!(["scramble", "silkworm", "absolute"].contains(&session.root_word()));
        assert!(session.used_words().is_empty());
    }

    #[test]
    fn test_root_word_choice_varies_with_seed() {
        let words = "scramble\nsilkworm\nabsolute\n".to_string();
        let roots: HashSet<String> = (0..32)
            .map(|seed| {
                Session::with_seed(dictionary(), words.clone(), seed)
                    .unwrap()
                    .root_word()
                    .to_string()
            })
            .collect();
        assert!(roots.len() > 1, "every seed picked {roots:?}");
        assert!(
            roots
                .iter()
                .all(|r| ["scramble", "silkworm", "absolute"].contains(&r.as_str()))
        );
    }

    #[test]
    fn test_new_rounds_vary_within_one_session() {
        let words = "scramble\nsilkworm\nabsolute\n".to_string();
        let mut session = Session::with_seed(dictionary(), words, 3).unwrap();
        let mut roots = HashSet::new();
        for _ in 0..32 {
            roots.insert(session.start_session().unwrap().to_string());
        }
        assert!(roots.len() > 1);
    }

    #[test]
    fn test_same_seed_same_root_word() {
        let a = Session::with_seed(dictionary(), EmbeddedWordList, 42).unwrap();
        let b = Session::with_seed(dictionary(), EmbeddedWordList, 42).unwrap();
        assert_eq!(a.root_word(), b.root_word());
    }

    #[test]
    fn test_unavailable_source_falls_back() {
        let session = Session::with_seed(dictionary(), None::<String>, 0).unwrap();
        assert_eq!(session.root_word(), FALLBACK_ROOT_WORD);
    }

    #[test]
    fn test_empty_source_falls_back() {
        let session = Session::with_seed(dictionary(), "\n  \n".to_string(), 0).unwrap();
        assert_eq!(session.root_word(), FALLBACK_ROOT_WORD);
    }

    #[test]
    fn test_unreadable_source_is_an_error() {
        let source = FailsAfterFirst {
            fetched: Cell::new(true),
        };
        let result = Session::with_seed(dictionary(), source, 0);
        assert!(matches!(result, Err(SessionError::WordList(_))));
    }

    #[test]
    fn test_failed_restart_keeps_current_round() {
        let source = FailsAfterFirst {
            fetched: Cell::new(false),
        };
        let mut session = Session::with_seed(dictionary(), source, 0).unwrap();
        session.submit_word("cable").unwrap();

        assert!(session.start_session().is_err());
        assert_eq!(session.root_word(), "scramble");
        assert_eq!(session.used_words(), ["cable"]);
    }

    #[test]
    fn test_start_session_resets_words() {
        let mut session = scramble_session();
        session.submit_word("cable").unwrap();
        assert_eq!(session.start_session().unwrap(), "scramble");
        assert!(session.used_words().is_empty());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_submit_word_prepends_and_scores() {
        let mut session = scramble_session();
        assert_eq!(session.submit_word(" CABLE ").unwrap(), "cable");
        assert_eq!(session.score(), 6);
        assert_eq!(session.submit_word("scam").unwrap(), "scam");
        assert_eq!(session.score(), 11);
        assert_eq!(session.used_words(), ["scam", "cable"]);
    }

    #[test]
    fn test_rejected_submission_leaves_state() {
        let mut session = scramble_session();
        session.submit_word("cable").unwrap();
        let before = session.state().clone();

        for raw in ["cable", "scramble", "xy", "zzzzz", "clam"] {
            assert!(session.submit_word(raw).is_err(), "{raw}");
        }
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_game_loop_plays_round() {
        let mut session = scramble_session();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Submit("cable".to_string())),
            None,
            Some(UserAction::Submit("cable".to_string())),
            Some(UserAction::Submit("blame".to_string())),
            Some(UserAction::Exit),
        ]);

        game_loop(&mut session, &mut interface);

        assert_eq!(interface.new_games, ["scramble"]);
        assert_eq!(
            interface.accepted,
            [("cable".to_string(), 6), ("blame".to_string(), 12)]
        );
        assert_eq!(interface.rejected, [ValidationError::AlreadyUsed]);
        assert!(interface.exited);
    }

    #[test]
    fn test_game_loop_new_game() {
        let mut session = scramble_session();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Submit("cable".to_string())),
            Some(UserAction::NewGame),
        ]);

        game_loop(&mut session, &mut interface);

        assert_eq!(interface.new_games.len(), 2);
        assert!(session.used_words().is_empty());
        assert!(interface.exited);
    }

    #[test]
    fn test_game_loop_reports_restart_failure() {
        let source = FailsAfterFirst {
            fetched: Cell::new(false),
        };
        let mut session = Session::with_seed(dictionary(), source, 0).unwrap();
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::NewGame),
            Some(UserAction::Submit("crab".to_string())),
        ]);

        game_loop(&mut session, &mut interface);

        assert_eq!(interface.session_errors, 1);
        assert_eq!(interface.accepted, [("crab".to_string(), 5)]);
    }

    #[test]
    fn test_embedded_session_with_embedded_dictionary() {
        let session = Session::new(WordListDictionary::embedded(), EmbeddedWordList).unwrap();
        assert_eq!(session.root_word().chars().count(), 8);
    }
}
