use crate::game_state::GameState;
use crate::session::{GameInterface, SessionError, UserAction};
use crate::debug_log;
use crate::validator::ValidationError;
use clap::Parser;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const NEW_GAME_COMMAND: &str = ":new";
pub const QUIT_COMMAND: &str = ":quit";

/// Word Scramble: build as many words as you can from the root word
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of root words
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Path to a newline-delimited English dictionary
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Seed for picking root words, for reproducible games
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long = "plain")]
    pub plain: bool,

    /// Where to write the log file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map one line of input to an action. Blank lines are ignored.
fn parse_action(line: &str) -> Option<UserAction> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case(QUIT_COMMAND) {
        return Some(UserAction::Exit);
    }
    if trimmed.eq_ignore_ascii_case(NEW_GAME_COMMAND) {
        return Some(UserAction::NewGame);
    }
    Some(UserAction::Submit(trimmed.to_string()))
}

fn write_word_list<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    writeln!(out, "Score: {}", state.score())?;
    for word in state.used_words() {
        writeln!(out, "  ({}) {}", word.chars().count(), word)?;
    }
    Ok(())
}

/// Line-oriented implementation of [`GameInterface`].
///
/// Generic over input and output so games can be scripted in tests.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    write_failed: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            write_failed: false,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Output is best effort; only the first failure is logged.
    fn check_write(&mut self, result: io::Result<()>) {
        if let Err(e) = result
            && !self.write_failed
        {
            self.write_failed = true;
            warn!("Writing game output failed: {e}");
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_new_game(&mut self, state: &GameState) {
        let out = &mut self.writer;
        let result = writeln!(out, "\nNew game! Your word is: {}", state.root_word())
            .and_then(|()| {
                writeln!(
                    out,
                    "Make words of 3+ letters from it. '{NEW_GAME_COMMAND}' for a new word, '{QUIT_COMMAND}' to quit."
                )
            })
            .and_then(|()| write_word_list(out, state));
        self.check_write(result);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let prompt = write!(self.writer, "> ").and_then(|()| self.writer.flush());
        self.check_write(prompt);

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => parse_action(&input),
            // The bad line has been consumed, so the next read moves on
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                debug_log!("read_action() - Unreadable input line: {}", e);
                let result = writeln!(self.writer, "Could not read that input, try again.");
                self.check_write(result);
                None
            }
            Err(e) => {
                warn!("Reading input failed, exiting: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_accepted(&mut self, word: &str, state: &GameState) {
        let out = &mut self.writer;
        let result = writeln!(out, "'{word}' accepted. [{}]", state.root_word())
            .and_then(|()| write_word_list(out, state));
        self.check_write(result);
    }

    fn display_rejected(&mut self, error: &ValidationError) {
        let result = writeln!(self.writer, "{}\n  {}", error.title(), error.message());
        self.check_write(result);
    }

    fn display_session_error(&mut self, error: &SessionError) {
        let result = writeln!(self.writer, "Could not start a new game: {error}");
        self.check_write(result);
    }

    fn display_exit_message(&mut self) {
        let result = writeln!(self.writer, "Exiting.");
        self.check_write(result);
    }
}
