//! Per-letter feedback for a guess.
//!
//! Feedback is written with one symbol per letter: `g` (green, right letter in
//! the right place), `y` (yellow, letter appears elsewhere) and `r` (red, letter
//! does not appear).
//!
//! Letter multiplicity is not tracked. A guess letter that appears anywhere in
//! the solution is yellow even when the solution's copies of it are already
//! accounted for by other tiles, so `eerie` against `there` marks every `e`
//! green or yellow. The red rule in [`Feedback::admits`] depends on this: a red
//! letter is never in the solution at all.

use crate::error::SolverError;
use crate::word::Word;
use std::fmt;
use std::str::FromStr;

/// Status of a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Green
    Match,
    /// Yellow
    Present,
    /// Red
    Absent,
}

impl Feedback {
    /// Parse one feedback symbol, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Self::Match),
            'y' => Some(Self::Present),
            'r' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Match => 'g',
            Self::Present => 'y',
            Self::Absent => 'r',
        }
    }

    /// Status of `letter`, guessed at `position`, against `solution`.
    pub fn classify(letter: u8, position: usize, solution: &Word) -> Self {
        if solution.letter_at(position) == Some(letter) {
            Self::Match
        } else if solution.contains(letter) {
            Self::Present
        } else {
            Self::Absent
        }
    }

    /// Whether `word` is still possible given that `letter` at `position`
    /// received this status.
    pub fn admits(self, word: &Word, position: usize, letter: u8) -> bool {
        match self {
            Self::Absent => !word.contains(letter),
            Self::Present => word.contains(letter) && word.letter_at(position) != Some(letter),
            Self::Match => word.letter_at(position) == Some(letter),
        }
    }
}

/// Feedback for a whole guess, one status per letter position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeedbackCode(Vec<Feedback>);

impl FeedbackCode {
    pub fn new(symbols: Vec<Feedback>) -> Self {
        Self(symbols)
    }

    /// Feedback the game would show for `candidate` if `solution` were the answer.
    pub fn compute(candidate: &Word, solution: &Word) -> Result<Self, SolverError> {
        let mut code = Self(Vec::with_capacity(candidate.len()));
        code.recompute(candidate, solution)?;
        Ok(code)
    }

    /// Overwrite this code in place with the feedback for `candidate` against
    /// `solution`, reusing the existing allocation.
    pub fn recompute(&mut self, candidate: &Word, solution: &Word) -> Result<(), SolverError> {
        solution.ensure_len(candidate.len())?;
        self.0.clear();
        self.0.extend(
            candidate
                .as_bytes()
                .iter()
                .enumerate()
                .map(|(i, &letter)| Feedback::classify(letter, i, solution)),
        );
        Ok(())
    }

    /// Parse an `r`/`y`/`g` string that must have exactly `expected_len` symbols.
    pub fn parse(input: &str, expected_len: usize) -> Result<Self, SolverError> {
        let code: Self = input.parse()?;
        if code.len() != expected_len {
            return Err(SolverError::FeedbackLength {
                expected: expected_len,
                found: code.len(),
            });
        }
        Ok(code)
    }

    pub fn symbols(&self) -> &[Feedback] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every letter is green.
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&f| f == Feedback::Match)
    }
}

impl FromStr for FeedbackCode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Feedback::from_char(symbol)
                    .ok_or(SolverError::InvalidFeedbackSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for FeedbackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.to_char())?;
        }
        Ok(())
    }
}
