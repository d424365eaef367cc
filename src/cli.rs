use crate::config::{DEFAULT_FIRST_GUESS, Settings, past_solutions_on};
use crate::error::SolverError;
use crate::game_state::{GameInterface, Opening, Recommendation, RoundReport, UserAction};
use crate::word::{WORD_LENGTH, Word};
use crate::wordbank::Skip;
use chrono::NaiveDate;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

const CELEBRATION_BANNER: &str = r"
     *        .        *        .        *
        \o/       S O L V E D !      \o/
         |     ___________________     |
        / \   |  |  |  |  |  |  |  |  / \
     *        .        *        .        *
";

/// Wordle assistant: narrows the candidate list from your feedback and
/// suggests the guess that eliminates the most words on average
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Solution word list: one word per line, or quoted and comma-separated
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Extra words accepted as guesses
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Treat the first N words of the solution list as past answers
    #[arg(long, value_name = "N", default_value_t = 0, conflicts_with = "skip_to_today")]
    pub skip: usize,

    /// Skip every answer used before today's puzzle (needs a chronological list)
    #[arg(long)]
    pub skip_to_today: bool,

    /// Opening suggestion shown before any feedback
    #[arg(long, default_value = DEFAULT_FIRST_GUESS, conflicts_with = "rank_first")]
    pub first_guess: String,

    /// Rank the whole word list for the opening suggestion instead
    #[arg(long)]
    pub rank_first: bool,

    /// Stop ranking after this many milliseconds and keep the best guess so far
    #[arg(long, value_name = "MS")]
    pub time_limit_ms: Option<u64>,

    /// Accept guesses that are not in the dictionary
    #[arg(long)]
    pub allow_unknown: bool,

    /// Full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings, SolverError> {
        let first_guess = if self.rank_first {
            None
        } else {
            Some(Word::with_length(&self.first_guess, WORD_LENGTH)?)
        };
        Ok(Settings {
            first_guess,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            allow_unknown_guesses: self.allow_unknown,
            ..Settings::default()
        })
    }

    /// Leading solution-list entries to exclude on `today`. The date-based
    /// count is capped to the list, which may be older than today's puzzle.
    pub fn skip_count(&self, today: NaiveDate) -> Skip {
        if self.skip_to_today {
            Skip::AtMost(past_solutions_on(today))
        } else {
            Skip::Exactly(self.skip)
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// One trimmed line, or `None` at end of input.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::error!("Failed to read input: {e}");
            None
        }
    }
}

fn prompt(text: &str) {
    print!("{text}");
    if let Err(e) = io::stdout().flush() {
        log::warn!("Failed to flush prompt: {e}");
    }
}

fn parse_guess_input(input: &str) -> Option<UserAction> {
    match input.to_ascii_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "next" => Some(UserAction::NewGame),
        "undo" => Some(UserAction::Undo),
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R, guess_number: usize) -> Option<UserAction> {
    prompt(&format!(
        "\nEnter word (guess #{guess_number}), or 'undo', 'next' or 'exit': "
    ));
    match read_trimmed_line(reader) {
        Some(input) => parse_guess_input(&input),
        None => Some(UserAction::Exit),
    }
}

pub fn read_feedback<R: BufRead>(reader: &mut R, guess: &Word) -> Option<String> {
    println!("\nStatus codes for {guess} ~");
    println!("\tNot in word - r\n\tElsewhere - y\n\tCorrect - g");
    prompt("\nEnter status (ex: rgyry): ");
    read_trimmed_line(reader)
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> bool {
    prompt("\nPlay again? (y/n): ");
    read_trimmed_line(reader)
        .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn display_opening(opening: &Opening) {
    println!("Hello! Welcome to the Wordle Solver. Enter your first guess below...\n");
    println!("Loaded {} possible solutions.", opening.word_count);
    if opening.past_excluded > 0 {
        println!("({} past solutions excluded.)", opening.past_excluded);
    }
    if let Some(suggestion) = &opening.suggestion {
        display_recommendation(suggestion);
    }
}

pub fn display_round(report: &RoundReport) {
    println!("\n*** Calculating ***\n");
    println!("{} words eliminated.", report.eliminated);
    if report.remaining > 1 {
        println!("Remaining possibilities: {}\n", report.remaining);
        println!(
            "{} possibilities (of {}):",
            report.sample.len(),
            report.remaining
        );
        for word in &report.sample {
            println!("\t{word}");
        }
        println!("\n--------------------------------------------\n");
    }
}

pub fn display_recommendation(recommendation: &Recommendation) {
    match recommendation.average_eliminated {
        Some(average) => println!(
            "BEST NEXT GUESS: {} (eliminates {average} on average){}",
            recommendation.guess,
            if recommendation.complete {
                ""
            } else {
                " [time limit reached]"
            }
        ),
        None => println!("BEST NEXT GUESS: {}", recommendation.guess),
    }
}

pub fn display_invalid_input(message: &str) {
    println!("{message}");
}

pub fn display_computing_message() {
    println!("Computing best next guess, please wait...");
}

pub fn display_no_candidates_message() {
    println!("Remaining possibilities: 0");
    println!("Hmm... are you sure you're playing today's Wordle? No candidates remain. Check your inputs.");
}

pub fn display_solution_found(solution: &Word, guesses: usize, deduced: bool) {
    if deduced {
        println!("ONE POSSIBILITY REMAINING!!");
    }
    println!("{CELEBRATION_BANNER}");
    println!("SOLUTION: {solution}");
    println!("GUESSES NEEDED: {guesses}");
}

pub fn display_undo_message(remaining: usize) {
    println!("Last round undone. {remaining} possibilities again.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(word_count: usize) {
    println!("New game started. Loaded {word_count} words.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_opening(&mut self, opening: &Opening) {
        display_opening(opening);
    }

    fn read_guess(&mut self, guess_number: usize) -> Option<UserAction> {
        read_guess(&mut self.reader, guess_number)
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<String> {
        read_feedback(&mut self.reader, guess)
    }

    fn display_invalid_input(&mut self, message: &str) {
        display_invalid_input(message);
    }

    fn display_round(&mut self, report: &RoundReport) {
        display_round(report);
    }

    fn display_computing_message(&mut self) {
        display_computing_message();
    }

    fn display_recommendation(&mut self, recommendation: &Recommendation) {
        display_recommendation(recommendation);
    }

    fn display_no_candidates_message(&mut self) {
        display_no_candidates_message();
    }

    fn display_solution_found(&mut self, solution: &Word, guesses: usize, deduced: bool) {
        display_solution_found(solution, guesses, deduced);
    }

    fn display_undo_message(&mut self, remaining: usize) {
        display_undo_message(remaining);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        display_new_game_message(word_count);
    }

    fn read_play_again(&mut self) -> bool {
        read_play_again(&mut self.reader)
    }
}
