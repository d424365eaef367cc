//! Guess ranking by average eliminations.
//!
//! Every remaining candidate is tried as the next guess. For each one, every
//! remaining candidate is in turn assumed to be the answer, the feedback that
//! answer would produce is applied, and the number of words it rules out is
//! counted. The guess with the highest mean wins. This is O(n^3 * L) in the
//! number of candidates, so rankers can be given a time budget.

use crate::candidates::CandidateSet;
use crate::error::SolverError;
use crate::feedback::FeedbackCode;
use crate::word::Word;
use crate::{debug_log, info_log};
use std::time::{Duration, Instant};

/// The outcome of ranking a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub guess: Word,
    /// Rounded mean number of candidates the guess eliminates.
    pub average_eliminated: usize,
    /// How many guesses were scored before ranking stopped.
    pub evaluated: usize,
    /// False when a time budget cut ranking short.
    pub complete: bool,
}

/// Picks the next guess from a candidate set.
pub trait GuessRanker {
    fn rank(&self, candidates: &CandidateSet) -> Result<Suggestion, SolverError>;
}

/// Exhaustive ranking by [`average_eliminated`], ties going to the earliest
/// candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageElimination {
    time_limit: Option<Duration>,
}

impl AverageElimination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop scoring new guesses once `limit` has elapsed. At least one guess
    /// is always scored.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl GuessRanker for AverageElimination {
    fn rank(&self, candidates: &CandidateSet) -> Result<Suggestion, SolverError> {
        let started = Instant::now();
        let mut best: Option<(&Word, usize)> = None;
        let mut evaluated = 0;
        let mut complete = true;

        for guess in candidates {
            if evaluated > 0
                && let Some(limit) = self.time_limit
                && started.elapsed() >= limit
            {
                info_log!(
                    "Ranking stopped after {} of {} guesses ({:?} budget)",
                    evaluated,
                    candidates.len(),
                    limit
                );
                complete = false;
                break;
            }

            let score = average_eliminated(guess, candidates)?;
            debug_log!("{} eliminates {} on average", guess, score);
            evaluated += 1;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((guess, score));
            }
        }

        let (guess, average_eliminated) = best.ok_or(SolverError::EmptyCandidates)?;
        log::debug!(
            "Best guess {guess} ({average_eliminated} avg) from {} candidates in {:?}",
            candidates.len(),
            started.elapsed()
        );
        Ok(Suggestion {
            guess: guess.clone(),
            average_eliminated,
            evaluated,
            complete,
        })
    }
}

/// Rounded mean number of candidates `guess` would eliminate, taking each
/// candidate in turn as the hidden solution.
///
/// The candidate set is only borrowed, so every hypothetical solution is
/// scored against the same untouched set.
pub fn average_eliminated(guess: &Word, candidates: &CandidateSet) -> Result<usize, SolverError> {
    if candidates.is_empty() {
        return Err(SolverError::EmptyCandidates);
    }
    guess.ensure_len(candidates.word_length())?;

    let mut code = FeedbackCode::default();
    let mut total = 0;
    for solution in candidates {
        code.recompute(guess, solution)?;
        total += candidates.count_inconsistent(guess, &code);
    }
    Ok(rounded_mean(total, candidates.len()))
}

/// The candidate that eliminates the most words on average.
pub fn best_guess(candidates: &CandidateSet) -> Result<Word, SolverError> {
    AverageElimination::new()
        .rank(candidates)
        .map(|suggestion| suggestion.guess)
}

// Halves round up.
fn rounded_mean(total: usize, count: usize) -> usize {
    (2 * total + count) / (2 * count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::WORD_LENGTH;

    fn set(words: &[&str]) -> CandidateSet {
        CandidateSet::from_words(
            words.iter().map(|w| Word::new(w).unwrap()),
            WORD_LENGTH,
        )
        .unwrap()
    }

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(0, 1), 0);
        assert_eq!(rounded_mean(4, 3), 1);
        assert_eq!(rounded_mean(5, 3), 2);
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(6, 3), 2);
    }

    #[test]
    fn test_average_eliminated() {
        let candidates = set(&["abcde", "abcdf", "ghijk"]);
        assert_eq!(average_eliminated(&w("abcde"), &candidates), Ok(2));
        assert_eq!(average_eliminated(&w("abcdf"), &candidates), Ok(2));
        // Two misses each rule out one word, the hit rules out two: 4 / 3.
        assert_eq!(average_eliminated(&w("ghijk"), &candidates), Ok(1));
    }

    #[test]
    fn test_average_eliminated_leaves_set_untouched() {
        let candidates = set(&["adieu", "radio", "audio", "raise", "lapse"]);
        let before = candidates.clone();
        for guess in before.iter() {
            average_eliminated(guess, &candidates).unwrap();
            assert_eq!(candidates, before);
        }
        average_eliminated(&w("crane"), &candidates).unwrap();
        assert_eq!(candidates, before);
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_average_eliminated_preconditions() {
        let empty = CandidateSet::new(WORD_LENGTH);
        assert_eq!(
            average_eliminated(&w("crane"), &empty),
            Err(SolverError::EmptyCandidates)
        );
        let candidates = set(&["crane"]);
        assert_eq!(
            average_eliminated(&w("cranes"), &candidates),
            Err(SolverError::LengthMismatch {
                expected: 5,
                found: 6
            })
        );
    }

    #[test]
    fn test_best_guess_picks_maximum() {
        let candidates = set(&["ghijk", "abcdf", "abcde"]);
        assert_eq!(best_guess(&candidates), Ok(w("abcdf")));
    }

    #[test]
    fn test_best_guess_ties_go_to_first_candidate() {
        // Every guess scores 2 here.
        assert_eq!(best_guess(&set(&["adieu", "radio", "audio"])), Ok(w("adieu")));
        assert_eq!(best_guess(&set(&["radio", "adieu", "audio"])), Ok(w("radio")));
    }

    #[test]
    fn test_best_guess_single_candidate() {
        let suggestion = AverageElimination::new().rank(&set(&["crane"])).unwrap();
        assert_eq!(suggestion.guess, w("crane"));
        assert_eq!(suggestion.average_eliminated, 0);
        assert!(suggestion.complete);
    }

    #[test]
    fn test_best_guess_empty_set() {
        let empty = CandidateSet::new(WORD_LENGTH);
        assert_eq!(best_guess(&empty), Err(SolverError::EmptyCandidates));
    }

    #[test]
    fn test_rank_reports_full_evaluation() {
        let suggestion = AverageElimination::new()
            .rank(&set(&["ghijk", "abcdf", "abcde"]))
            .unwrap();
        assert_eq!(suggestion.evaluated, 3);
        assert_eq!(suggestion.average_eliminated, 2);
        assert!(suggestion.complete);
    }

    #[test]
    fn test_time_limit_keeps_best_so_far() {
        let ranker = AverageElimination::with_time_limit(Duration::ZERO);
        assert_eq!(ranker.time_limit(), Some(Duration::ZERO));
        let suggestion = ranker.rank(&set(&["ghijk", "abcdf", "abcde"])).unwrap();
        assert_eq!(suggestion.guess, w("ghijk"));
        assert_eq!(suggestion.evaluated, 1);
        assert!(!suggestion.complete);
    }
}
