//! TUI (Terminal User Interface) module for Word Scramble
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `View`: what is on screen, plus key handling; no terminal access
//! - `TuiInterface`: owns the terminal, draws the `View` and implements
//!   `GameInterface` for the game loop
//!
//! # State Machine
//! - `EnteringWord` → (rejected submission) → `ShowingError` → back to `EnteringWord`
//! - `Ctrl-N` starts a new game from `EnteringWord`; `Esc` quits

use crate::game_state::GameState;
use crate::session::{GameInterface, SessionError, UserAction};
use crate::validator::ValidationError;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LENGTH: usize = 32;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 7;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SCORE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const BADGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);
const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Debug, Clone, PartialEq, Eq)]
enum TuiState {
    EnteringWord,
    /// Modal dialog; the typed word is kept underneath.
    ShowingError { title: String, message: String },
}

/// Everything the screen shows, and how keys change it.
#[derive(Debug)]
struct View {
    root_word: String,
    used_words: Vec<String>,
    score: usize,
    current_input: String,
    state: TuiState,
    status: String,
}

impl View {
    fn new() -> Self {
        Self {
            root_word: String::new(),
            used_words: Vec::new(),
            score: 0,
            current_input: String::new(),
            state: TuiState::EnteringWord,
            status: "Ready".to_string(),
        }
    }

    fn sync(&mut self, state: &GameState) {
        self.root_word = state.root_word().to_string();
        self.used_words = state.used_words().to_vec();
        self.score = state.score();
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.state = TuiState::ShowingError {
            title: title.to_string(),
            message: message.to_string(),
        };
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }
        match self.state {
            TuiState::EnteringWord => self.handle_word_input(key),
            TuiState::ShowingError { .. } => {
                self.handle_dialog_input(key);
                None
            }
        }
    }

    fn handle_word_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('n' | 'N') if has_ctrl => {
                info_log!("handle_word_input() - Ctrl-N pressed, returning NewGame");
                return Some(UserAction::NewGame);
            }
            KeyCode::Char(c) if has_ctrl || has_alt || c.is_control() => {
                debug_log!("handle_word_input() - Ignoring {:?} with {:?}", c, key.modifiers);
            }
            KeyCode::Char(c) if self.current_input.chars().count() < MAX_INPUT_LENGTH => {
                self.current_input.push(c);
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter => {
                info_log!("handle_word_input() - Submitting '{}'", self.current_input);
                return Some(UserAction::Submit(self.current_input.clone()));
            }
            KeyCode::Esc => {
                info_log!("handle_word_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            _ => {
                debug_log!("handle_word_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_dialog_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.state = TuiState::EnteringWord;
            self.status = "Try another word".to_string();
        }
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Root word and score
                Constraint::Length(3), // Input
                Constraint::Min(5),    // Accepted words
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        self.render_input(f, chunks[1]);
        self.render_words(f, chunks[2]);
        Self::render_boxed(f, chunks[3], "Status", &self.status, HEADER_STYLE);
        Self::render_boxed(f, chunks[4], "", self.instructions(), Style::new().fg(Color::Gray));

        if let TuiState::ShowingError { title, message } = &self.state {
            Self::render_dialog(f, title, message);
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.root_word.to_uppercase(), HEADER_STYLE),
            Span::raw("   "),
            Span::styled(format!("Score: {}", self.score), SCORE_STYLE),
        ]);
        let title = Paragraph::new(line).block(
            Block::default()
                .title("WORD SCRAMBLE")
                .borders(Borders::ALL),
        );
        f.render_widget(title, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{}_", self.current_input), INPUT_STYLE),
        ]);
        let input = Paragraph::new(line).block(
            Block::default()
                .title("Enter your word")
                .borders(Borders::ALL),
        );
        f.render_widget(input, area);
    }

    fn render_words(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .used_words
            .iter()
            .map(|word| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", word.chars().count()), BADGE_STYLE),
                    Span::raw(format!(" {word}")),
                ])
            })
            .collect();
        let title = format!("Words ({})", self.used_words.len());
        let list = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(list, area);
    }

    fn render_boxed(f: &mut Frame, area: Rect, title: &str, text: &str, style: Style) {
        let paragraph = Paragraph::new(text.to_string())
            .style(style)
            .block(Block::default().title(title.to_string()).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_dialog(f: &mut Frame, title: &str, message: &str) {
        let area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, f.area());
        let lines = vec![
            Line::from(Span::styled(message.to_string(), Style::default())),
            Line::from(""),
            Line::from(Span::styled("[ OK ]", HEADER_STYLE)),
        ];
        let dialog = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(title.to_string(), ERROR_STYLE))
                    .borders(Borders::ALL),
            );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn instructions(&self) -> &'static str {
        match self.state {
            TuiState::EnteringWord => "ENTER: Submit | CTRL-N: New Game | ESC: Quit",
            TuiState::ShowingError { .. } => "ENTER/ESC: OK",
        }
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface<B: Backend> {
    terminal: Terminal<B>,
    view: View,
    owns_terminal: bool,
}

impl TuiInterface<CrosstermBackend<io::Stdout>> {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = match Self::enter_screen() {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                return Err(e);
            }
        };
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: View::new(),
            owns_terminal: true,
        })
    }

    fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }
}

impl<B: Backend> TuiInterface<B> {
    /// Wrap an already configured terminal; it is not restored on drop.
    pub fn with_terminal(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            view: View::new(),
            owns_terminal: false,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if self.owns_terminal {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
            self.owns_terminal = false;
        }
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let view = &self.view;
        self.terminal.draw(|f| view.render(f))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(self.view.handle_key(key)),
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl<B: Backend> GameInterface for TuiInterface<B> {
    fn display_new_game(&mut self, state: &GameState) {
        self.view.sync(state);
        self.view.current_input.clear();
        self.view.state = TuiState::EnteringWord;
        self.view.status = format!("New game - make words from '{}'", state.root_word());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input, returning Exit: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_accepted(&mut self, word: &str, state: &GameState) {
        self.view.sync(state);
        self.view.current_input.clear();
        self.view.status = format!("'{word}' accepted (+{})", word.chars().count() + 1);
        self.draw_or_log();
    }

    fn display_rejected(&mut self, error: &ValidationError) {
        self.view.show_error(error.title(), &error.message());
        self.view.status = error.title().to_string();
        self.draw_or_log();
    }

    fn display_session_error(&mut self, error: &SessionError) {
        self.view.show_error("New game failed", &error.to_string());
        self.view.status = "Still playing the current word".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.view.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl<B: Backend> Drop for TuiInterface<B> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
