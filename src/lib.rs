// Library interface for word-scramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod tui;
pub mod validator;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use dictionary::{DictionaryOracle, WordListDictionary};
pub use game_state::GameState;
pub use session::{GameInterface, Session, SessionError, UserAction, game_loop};
pub use validator::{ValidationError, validate};
pub use wordbank::{EmbeddedWordList, FileWordList, WordListSource};
