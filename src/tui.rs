//! Full-screen terminal interface built on Ratatui.
//!
//! # State Machine
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `EnteringGuess`
//! - `GameOver` waits for the play-again answer.
//!
//! Key handling lives on [`Board`], which owns no terminal, so it can be
//! driven directly in tests.

use crate::feedback::Feedback;
use crate::game_state::{GameInterface, Opening, Recommendation, RoundReport, UserAction};
use crate::word::{WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Marked(Feedback),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Marked(Feedback::Match) => (Color::Green, Color::Black),
            Self::Marked(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Marked(Feedback::Absent) => (Color::Red, Color::White),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn from_guess(guess: &Word) -> Self {
        let mut row = Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        };
        for (i, ch) in guess.as_str().chars().enumerate().take(WORD_LENGTH) {
            row.letters[i] = ch.to_ascii_uppercase();
            row.states[i] = LetterState::Entered;
        }
        row
    }

    /// Status codes in the `r`/`y`/`g` alphabet, once every letter is marked.
    fn feedback_code(&self) -> Option<String> {
        self.states
            .iter()
            .map(|state| match state {
                LetterState::Marked(feedback) => Some(feedback.to_char()),
                LetterState::Empty | LetterState::Entered => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    GameOver,
}

/// Result of one key while feedback is being marked.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FeedbackStep {
    Pending,
    Done(String),
    Exit,
}

/// Guess rows and input state, independent of the terminal.
#[derive(Debug)]
struct Board {
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    error_message: String,
}

impl Board {
    fn new() -> Self {
        Self {
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            error_message: String::new(),
        }
    }

    fn reset(&mut self) {
        self.guesses.clear();
        self.current_input.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringGuess;
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c)
                if c.is_ascii_alphabetic() && self.current_input.len() < WORD_LENGTH =>
            {
                if Self::has_modifier_keys(&key) {
                    debug_log!("Ignoring character with modifier: {:?}", key.modifiers);
                } else {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == WORD_LENGTH => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("Guess submitted: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = format!("Guess must be exactly {WORD_LENGTH} letters!");
            }
            KeyCode::Tab => return Some(UserAction::Undo),
            KeyCode::F(2) => return Some(UserAction::NewGame),
            KeyCode::Esc => return Some(UserAction::Exit),
            _ => {
                debug_log!("Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn start_marking(&mut self, guess: &Word) {
        self.guesses.push(GuessRow::from_guess(guess));
        self.error_message.clear();
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
    }

    fn handle_feedback_key(&mut self, key: KeyEvent) -> FeedbackStep {
        if key.code == KeyCode::Esc {
            return FeedbackStep::Exit;
        }
        if Self::has_modifier_keys(&key) {
            return FeedbackStep::Pending;
        }
        let Some(row) = self.guesses.last_mut() else {
            return FeedbackStep::Exit;
        };
        match self.state.clone() {
            TuiState::MarkingFeedback { marking_index } => match key.code {
                KeyCode::Char(c) => match Feedback::from_char(c) {
                    Some(feedback) => {
                        row.states[marking_index] = LetterState::Marked(feedback);
                        self.error_message.clear();
                        self.state = if marking_index + 1 < WORD_LENGTH {
                            TuiState::MarkingFeedback {
                                marking_index: marking_index + 1,
                            }
                        } else {
                            TuiState::ConfirmingFeedback
                        };
                    }
                    None => {
                        self.error_message =
                            format!("'{c}' is not a status code. Use r, y or g.");
                    }
                },
                KeyCode::Backspace if marking_index > 0 => {
                    row.states[marking_index - 1] = LetterState::Entered;
                    self.state = TuiState::MarkingFeedback {
                        marking_index: marking_index - 1,
                    };
                }
                _ => {}
            },
            TuiState::ConfirmingFeedback => match key.code {
                KeyCode::Enter => {
                    if let Some(code) = row.feedback_code() {
                        self.state = TuiState::EnteringGuess;
                        return FeedbackStep::Done(code);
                    }
                }
                KeyCode::Backspace => {
                    row.states[WORD_LENGTH - 1] = LetterState::Entered;
                    self.state = TuiState::MarkingFeedback {
                        marking_index: WORD_LENGTH - 1,
                    };
                }
                _ => {}
            },
            TuiState::EnteringGuess | TuiState::GameOver => {}
        }
        FeedbackStep::Pending
    }

    /// `Some(true)` starts another game, `Some(false)` quits.
    fn handle_game_over_key(key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('n' | 'N') | KeyCode::Enter | KeyCode::F(2) => Some(true),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }
}

/// Context for rendering the UI.
struct RenderContext<'a> {
    board: &'a Board,
    candidates_display: &'a [Word],
    remaining: usize,
    recommendation: Option<&'a Recommendation>,
    message: &'a str,
    status: &'a str,
}

/// Terminal front end for the session loop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Board,
    candidates_display: Vec<Word>,
    remaining: usize,
    recommendation: Option<Recommendation>,
    message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            board: Board::new(),
            candidates_display: Vec::new(),
            remaining: 0,
            recommendation: None,
            message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: &self.board,
            candidates_display: &self.candidates_display,
            remaining: self.remaining,
            recommendation: self.recommendation.as_ref(),
            message: &self.message,
            status: &self.status,
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::error!("Draw error: {e}");
        }
    }

    /// Next key press, or `None` when nothing usable arrived within the poll window.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        // Escape sequences from focus changes can arrive as garbage characters.
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("Ignoring invalid character {:?}", c);
            return Ok(None);
        }
        Ok(Some(key))
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Game board
            Constraint::Min(8),     // Info panel
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    let title = Paragraph::new("WORDLE ASSIST")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);
    render_board(f, chunks[1], ctx.board);
    render_info(f, chunks[2], ctx);
    let status = if ctx.status.is_empty() {
        "Ready"
    } else {
        ctx.status
    };
    f.render_widget(
        Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status")),
        chunks[3],
    );
    render_instructions(f, chunks[4], &ctx.board.state);
}

fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let available_rows = usize::from(inner.height / ROW_SPACING).max(1);
    let showing_input = board.state == TuiState::EnteringGuess;
    let rows_needed = board.guesses.len() + usize::from(showing_input);
    // Oldest rows scroll off first.
    let skip = rows_needed.saturating_sub(available_rows);
    let last_row = board.guesses.len().saturating_sub(skip + 1);

    for (row_index, row) in board.guesses.iter().skip(skip).enumerate() {
        let mut spans = letter_spans(row.letters.iter().copied().zip(row.states));
        if let TuiState::MarkingFeedback { marking_index } = board.state
            && row_index == last_row
        {
            spans.push(Span::raw(format!(
                " <- Marking letter {} (R/Y/G)",
                marking_index + 1
            )));
        }
        render_line(f, inner, row_index, spans);
    }

    if showing_input {
        let letters = (0..WORD_LENGTH).map(|i| {
            let letter = board.current_input.chars().nth(i).unwrap_or(' ');
            (letter, LetterState::Entered)
        });
        render_line(f, inner, board.guesses.len() - skip, letter_spans(letters));
    }
}

fn letter_spans(letters: impl Iterator<Item = (char, LetterState)>) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for (letter, state) in letters {
        let (bg, fg) = state.colors();
        spans.push(Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg).bg(bg),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = Vec::new();

    if let Some(rec) = ctx.recommendation {
        let text = match rec.average_eliminated {
            Some(average) if rec.complete => {
                format!("Best next guess: {} (eliminates {average} on average)", rec.guess)
            }
            Some(average) => format!(
                "Best next guess: {} (eliminates {average} on average, time limit reached)",
                rec.guess
            ),
            None => format!("Suggested first guess: {}", rec.guess),
        };
        lines.push(Line::from(vec![Span::styled(text, SUCCESS_STYLE)]));
        lines.push(Line::from(""));
    }

    if !ctx.candidates_display.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            format!("Remaining possibilities ({}):", ctx.remaining),
            INFO_STYLE,
        )]));
        for word in ctx.candidates_display {
            lines.push(Line::from(format!("  {word}")));
        }
        if ctx.remaining > ctx.candidates_display.len() {
            lines.push(Line::from(format!(
                "  ... and {} more",
                ctx.remaining - ctx.candidates_display.len()
            )));
        }
        lines.push(Line::from(""));
    }

    if !ctx.message.is_empty() {
        lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
    }
    if !ctx.board.error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            ctx.board.error_message.as_str(),
            ERROR_STYLE,
        )]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
    let text = match state {
        TuiState::EnteringGuess => {
            "Type your guess | ENTER: Submit | TAB: Undo | F2: New game | ESC: Quit"
        }
        TuiState::MarkingFeedback { .. } => {
            "R: Not in word | Y: Elsewhere | G: Correct | BACKSPACE: Go back | ESC: Quit"
        }
        TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Edit",
        TuiState::GameOver => "N: New game | ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_opening(&mut self, opening: &Opening) {
        self.recommendation.clone_from(&opening.suggestion);
        self.message = if opening.past_excluded > 0 {
            format!(
                "Loaded {} possible solutions ({} past solutions excluded).",
                opening.word_count, opening.past_excluded
            )
        } else {
            format!("Loaded {} possible solutions.", opening.word_count)
        };
        self.status = "Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self, guess_number: usize) -> Option<UserAction> {
        self.board.state = TuiState::EnteringGuess;
        self.status = format!("Guess #{guess_number}");
        loop {
            if self.draw().is_err() {
                return Some(UserAction::Exit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.board.handle_guess_key(key) {
                        info_log!("read_guess() - action {:?}", action);
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Input error: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<String> {
        self.board.start_marking(guess);
        self.status = format!("Mark each letter of {guess}: R, Y or G");
        loop {
            if self.board.state == TuiState::ConfirmingFeedback {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            if self.draw().is_err() {
                return None;
            }
            match Self::next_key() {
                Ok(Some(key)) => match self.board.handle_feedback_key(key) {
                    FeedbackStep::Pending => {}
                    FeedbackStep::Done(code) => return Some(code),
                    FeedbackStep::Exit => return None,
                },
                Ok(None) => {}
                Err(e) => {
                    log::error!("Input error: {e}");
                    return None;
                }
            }
        }
    }

    fn display_invalid_input(&mut self, message: &str) {
        self.board.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_round(&mut self, report: &RoundReport) {
        self.candidates_display.clone_from(&report.sample);
        self.remaining = report.remaining;
        self.message = format!("{} words eliminated.", report.eliminated);
        self.status = format!("{} remaining", report.remaining);
        self.draw_or_log();
    }

    fn display_computing_message(&mut self) {
        self.status = "Computing best next guess...".to_string();
        self.draw_or_log();
    }

    fn display_recommendation(&mut self, recommendation: &Recommendation) {
        self.recommendation = Some(recommendation.clone());
        self.status = format!("Recommendation ready: {}", recommendation.guess);
        self.draw_or_log();
    }

    fn display_no_candidates_message(&mut self) {
        self.board.state = TuiState::GameOver;
        self.recommendation = None;
        self.message =
            "No candidates remain. Are you sure you're playing today's Wordle?".to_string();
        self.status = "No valid candidates found".to_string();
        self.draw_or_log();
    }

    fn display_solution_found(&mut self, solution: &Word, guesses: usize, deduced: bool) {
        self.board.state = TuiState::GameOver;
        self.recommendation = None;
        self.message = if deduced {
            format!("Only one possibility left: {solution} - guesses needed: {guesses}")
        } else {
            format!("Solution: {solution} - guesses needed: {guesses}")
        };
        self.status = format!("Solved: {solution}");
        self.draw_or_log();
    }

    fn display_undo_message(&mut self, remaining: usize) {
        self.board.guesses.pop();
        self.remaining = remaining;
        self.candidates_display.clear();
        self.message = format!("Last round undone. {remaining} possibilities again.");
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.board.reset();
        self.candidates_display.clear();
        self.remaining = 0;
        self.recommendation = None;
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> bool {
        self.board.state = TuiState::GameOver;
        loop {
            if self.draw().is_err() {
                return false;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(again) = Board::handle_game_over_key(key) {
                        return again;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Input error: {e}");
                    return false;
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
