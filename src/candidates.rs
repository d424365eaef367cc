//! The shrinking set of words that could still be the solution.

use crate::error::SolverError;
use crate::feedback::{Feedback, FeedbackCode};
use crate::word::Word;
use std::collections::HashSet;

/// Words still consistent with every piece of feedback seen so far.
///
/// Keeps insertion order, so iteration (and therefore ranking ties) is
/// deterministic. The hash index gives constant-time membership checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    words: Vec<Word>,
    index: HashSet<Word>,
    word_length: usize,
}

impl CandidateSet {
    pub fn new(word_length: usize) -> Self {
        Self {
            words: Vec::new(),
            index: HashSet::new(),
            word_length,
        }
    }

    /// Build a set from `words`, dropping repeats and keeping first-seen order.
    pub fn from_words<I>(words: I, word_length: usize) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = Word>,
    {
        let mut set = Self::new(word_length);
        for word in words {
            set.insert(word)?;
        }
        Ok(set)
    }

    /// Add `word`, returning false if it was already present.
    pub fn insert(&mut self, word: Word) -> Result<bool, SolverError> {
        word.ensure_len(self.word_length)?;
        if self.index.contains(&word) {
            return Ok(false);
        }
        self.index.insert(word.clone());
        self.words.push(word);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    /// Remove every word inconsistent with `letter` at `position` having
    /// received `status`. Returns how many words were removed.
    pub fn eliminate_letter(
        &mut self,
        position: usize,
        letter: u8,
        status: Feedback,
    ) -> Result<usize, SolverError> {
        if position >= self.word_length {
            return Err(SolverError::PositionOutOfRange {
                position,
                length: self.word_length,
            });
        }
        Ok(self.retain_where(|word| status.admits(word, position, letter)))
    }

    /// Apply the feedback `code` received for `guess`, removing every word
    /// it rules out. Returns how many words were removed.
    pub fn eliminate(&mut self, guess: &Word, code: &FeedbackCode) -> Result<usize, SolverError> {
        self.check_round(guess, code)?;
        Ok(self.retain_where(|word| is_consistent(word, guess, code)))
    }

    /// How many words [`eliminate`](Self::eliminate) would remove, without
    /// touching the set.
    pub fn count_eliminated(&self, guess: &Word, code: &FeedbackCode) -> Result<usize, SolverError> {
        self.check_round(guess, code)?;
        Ok(self.count_inconsistent(guess, code))
    }

    /// Length checks are the caller's job.
    pub(crate) fn count_inconsistent(&self, guess: &Word, code: &FeedbackCode) -> usize {
        self.words
            .iter()
            .filter(|word| !is_consistent(word, guess, code))
            .count()
    }

    fn check_round(&self, guess: &Word, code: &FeedbackCode) -> Result<(), SolverError> {
        guess.ensure_len(self.word_length)?;
        if code.len() != guess.len() {
            return Err(SolverError::FeedbackLength {
                expected: guess.len(),
                found: code.len(),
            });
        }
        Ok(())
    }

    fn retain_where(&mut self, mut keep: impl FnMut(&Word) -> bool) -> usize {
        let before = self.words.len();
        let index = &mut self.index;
        self.words.retain(|word| {
            let kept = keep(word);
            if !kept {
                index.remove(word);
            }
            kept
        });
        before - self.words.len()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Whether `word` survives every per-letter rule of `code` for `guess`.
fn is_consistent(word: &Word, guess: &Word, code: &FeedbackCode) -> bool {
    guess
        .as_bytes()
        .iter()
        .zip(code.symbols())
        .enumerate()
        .all(|(position, (&letter, status))| status.admits(word, position, letter))
}
