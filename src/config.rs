use crate::solver::AverageElimination;
use crate::word::Word;
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;

/// Opening guess offered before any feedback, instead of ranking the full pool.
pub const DEFAULT_FIRST_GUESS: &str = "raise";

/// Characters that separate words in a word-list file.
pub const DEFAULT_SEPARATORS: &str = " ,\"'\t\r\n";

/// How many remaining candidates are listed after each round.
pub const MAX_DISPLAYED_CANDIDATES: usize = 10;

/// Directory name under the platform data and cache directories.
pub const APP_DIR: &str = "wordle-assist";

pub const SOLUTIONS_FILE: &str = "solutions.txt";
pub const DICTIONARY_FILE: &str = "dictionary.txt";

// Day number (days since 0001-01-01, counting that day as 1) of 2021-06-19,
// the date of puzzle #0.
const FIRST_PUZZLE_DAY: i32 = 737_960;

/// Session settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Fixed opener; `None` ranks the whole pool before the first guess.
    pub first_guess: Option<Word>,
    /// Budget for each ranking pass.
    pub time_limit: Option<Duration>,
    pub max_displayed: usize,
    /// Accept guesses that are not in the dictionary.
    pub allow_unknown_guesses: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_guess: Word::new(DEFAULT_FIRST_GUESS).ok(),
            time_limit: None,
            max_displayed: MAX_DISPLAYED_CANDIDATES,
            allow_unknown_guesses: false,
        }
    }
}

impl Settings {
    pub fn ranker(&self) -> AverageElimination {
        match self.time_limit {
            Some(limit) => AverageElimination::with_time_limit(limit),
            None => AverageElimination::new(),
        }
    }
}

/// Puzzle number shown on `date`. Negative before the first puzzle.
pub fn puzzle_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce() - FIRST_PUZZLE_DAY)
}

/// How many answers of a chronological solution list were used before `date`.
pub fn past_solutions_on(date: NaiveDate) -> usize {
    usize::try_from(puzzle_number(date)).unwrap_or(0)
}

/// Per-user directory searched for `solutions.txt` and `dictionary.txt`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// `file_name` inside [`data_dir`], if that file exists.
pub fn user_list(file_name: &str) -> Option<PathBuf> {
    data_dir()
        .map(|dir| dir.join(file_name))
        .filter(|path| path.is_file())
}
