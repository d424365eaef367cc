use crate::candidates::CandidateSet;
use crate::config::Settings;
use crate::feedback::FeedbackCode;
use crate::solver::GuessRanker;
use crate::word::{WORD_LENGTH, Word};
use crate::wordbank::Wordbank;
use crate::{debug_log, info_log};

/// What the player asked for at the guess prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Undo,
    NewGame,
    Exit,
}

/// A suggested next guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub guess: Word,
    /// `None` for the fixed opener, which is not scored.
    pub average_eliminated: Option<usize>,
    /// False when the ranking time budget ran out first.
    pub complete: bool,
}

/// Shown once when the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub word_count: usize,
    pub past_excluded: usize,
    pub suggestion: Option<Recommendation>,
}

/// What one round of feedback did to the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub guess: Word,
    pub feedback: FeedbackCode,
    pub eliminated: usize,
    pub remaining: usize,
    /// The first few remaining candidates, for display.
    pub sample: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Solved(Word),
    /// The feedback ruled out every candidate.
    NoCandidates,
    /// The player left or started over mid-game.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Guesses used, counting the winning one.
    pub guesses: usize,
}

/// Input and output for the session loop. Implemented by the line-based
/// prompt and the terminal UI.
pub trait GameInterface {
    fn display_opening(&mut self, opening: &Opening);
    /// `None` means nothing usable was entered; the loop asks again.
    fn read_guess(&mut self, guess_number: usize) -> Option<UserAction>;
    /// Raw feedback for `guess`. `None` ends the session.
    fn read_feedback(&mut self, guess: &Word) -> Option<String>;
    fn display_invalid_input(&mut self, message: &str);
    fn display_round(&mut self, report: &RoundReport);
    fn display_computing_message(&mut self);
    fn display_recommendation(&mut self, recommendation: &Recommendation);
    fn display_no_candidates_message(&mut self);
    /// `deduced` is set when the solution was the last candidate standing
    /// rather than confirmed by all-green feedback.
    fn display_solution_found(&mut self, solution: &Word, guesses: usize, deduced: bool);
    fn display_undo_message(&mut self, remaining: usize);
    fn display_exit_message(&mut self);
    fn display_new_game_message(&mut self, word_count: usize);
    fn read_play_again(&mut self) -> bool;
}

/// Candidate state of the game in progress.
struct Game {
    candidates: CandidateSet,
    history: Vec<CandidateSet>,
}

impl Game {
    fn new(wordbank: &Wordbank) -> Self {
        Self {
            candidates: wordbank.candidates(),
            history: Vec::new(),
        }
    }

    fn rounds(&self) -> usize {
        self.history.len()
    }

    fn undo(&mut self) -> Option<usize> {
        self.candidates = self.history.pop()?;
        Some(self.candidates.len())
    }
}

/// Run games until the player exits, returning how each one ended.
pub fn game_loop<I: GameInterface + ?Sized>(
    wordbank: &Wordbank,
    settings: &Settings,
    interface: &mut I,
) -> Vec<GameOutcome> {
    let ranker = settings.ranker();
    let mut game = Game::new(wordbank);
    let opening = Opening {
        word_count: game.candidates.len(),
        past_excluded: wordbank.past_solutions().len(),
        suggestion: opening_suggestion(&game.candidates, settings, &ranker, interface),
    };
    interface.display_opening(&opening);

    let mut outcomes = Vec::new();
    loop {
        let action = match interface.read_guess(game.rounds() + 1) {
            Some(action) => action,
            None => continue,
        };
        debug_log!("game_loop() - action {:?}", action);

        let raw_guess = match action {
            UserAction::Exit => {
                if game.rounds() > 0 {
                    outcomes.push(GameOutcome {
                        result: GameResult::Abandoned,
                        guesses: game.rounds(),
                    });
                }
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                if game.rounds() > 0 {
                    outcomes.push(GameOutcome {
                        result: GameResult::Abandoned,
                        guesses: game.rounds(),
                    });
                }
                game = Game::new(wordbank);
                interface.display_new_game_message(game.candidates.len());
                continue;
            }
            UserAction::Undo => {
                match game.undo() {
                    Some(remaining) => interface.display_undo_message(remaining),
                    None => interface.display_invalid_input("Nothing to undo."),
                }
                continue;
            }
            UserAction::Guess(raw) => raw,
        };

        let guess = match validate_guess(&raw_guess, wordbank, settings) {
            Ok(guess) => guess,
            Err(message) => {
                interface.display_invalid_input(&message);
                continue;
            }
        };

        let Some(feedback) = read_feedback_code(interface, &guess) else {
            outcomes.push(GameOutcome {
                result: GameResult::Abandoned,
                guesses: game.rounds(),
            });
            interface.display_exit_message();
            break;
        };

        let Some(outcome) = play_round(&mut game, guess, feedback, settings, &ranker, interface)
        else {
            continue;
        };

        match &outcome.result {
            GameResult::Solved(solution) => {
                let deduced = outcome.guesses > game.rounds();
                interface.display_solution_found(solution, outcome.guesses, deduced);
            }
            GameResult::NoCandidates => interface.display_no_candidates_message(),
            GameResult::Abandoned => {}
        }
        info_log!("Game over: {:?}", outcome);
        outcomes.push(outcome);

        if interface.read_play_again() {
            game = Game::new(wordbank);
            interface.display_new_game_message(game.candidates.len());
        } else {
            interface.display_exit_message();
            break;
        }
    }
    outcomes
}

fn opening_suggestion<R: GuessRanker, I: GameInterface + ?Sized>(
    candidates: &CandidateSet,
    settings: &Settings,
    ranker: &R,
    interface: &mut I,
) -> Option<Recommendation> {
    if let Some(first_guess) = &settings.first_guess {
        return Some(Recommendation {
            guess: first_guess.clone(),
            average_eliminated: None,
            complete: true,
        });
    }
    interface.display_computing_message();
    recommend(candidates, ranker)
}

fn recommend<R: GuessRanker>(candidates: &CandidateSet, ranker: &R) -> Option<Recommendation> {
    match ranker.rank(candidates) {
        Ok(suggestion) => Some(Recommendation {
            guess: suggestion.guess,
            average_eliminated: Some(suggestion.average_eliminated),
            complete: suggestion.complete,
        }),
        Err(e) => {
            log::warn!("No recommendation: {e}");
            None
        }
    }
}

fn validate_guess(raw: &str, wordbank: &Wordbank, settings: &Settings) -> Result<Word, String> {
    let guess = Word::with_length(raw, WORD_LENGTH).map_err(|e| e.to_string())?;
    if !settings.allow_unknown_guesses && !wordbank.dictionary().contains(&guess) {
        return Err(format!("\"{guess}\" is not in the dictionary."));
    }
    Ok(guess)
}

fn read_feedback_code<I: GameInterface + ?Sized>(
    interface: &mut I,
    guess: &Word,
) -> Option<FeedbackCode> {
    loop {
        let raw = interface.read_feedback(guess)?;
        match FeedbackCode::parse(&raw, guess.len()) {
            Ok(code) => return Some(code),
            Err(e) => interface.display_invalid_input(&e.to_string()),
        }
    }
}

/// Apply one round of feedback. Returns the outcome once the game is over.
fn play_round<R: GuessRanker, I: GameInterface + ?Sized>(
    game: &mut Game,
    guess: Word,
    feedback: FeedbackCode,
    settings: &Settings,
    ranker: &R,
    interface: &mut I,
) -> Option<GameOutcome> {
    let before = game.candidates.clone();
    let eliminated = match game.candidates.eliminate(&guess, &feedback) {
        Ok(eliminated) => eliminated,
        Err(e) => {
            interface.display_invalid_input(&e.to_string());
            return None;
        }
    };
    game.history.push(before);
    info_log!(
        "Round {}: {} / {} eliminated {}, {} remain",
        game.rounds(),
        guess,
        feedback,
        eliminated,
        game.candidates.len()
    );

    interface.display_round(&RoundReport {
        eliminated,
        remaining: game.candidates.len(),
        sample: game
            .candidates
            .iter()
            .take(settings.max_displayed)
            .cloned()
            .collect(),
        guess: guess.clone(),
        feedback: feedback.clone(),
    });

    match game.candidates.as_slice() {
        // All-green on a word that is no longer a candidate is a contradiction too.
        [] => Some(GameOutcome {
            result: GameResult::NoCandidates,
            guesses: game.rounds(),
        }),
        _ if feedback.is_solved() => Some(GameOutcome {
            result: GameResult::Solved(guess),
            guesses: game.rounds(),
        }),
        // The last candidate still has to be typed in.
        [solution] => Some(GameOutcome {
            result: GameResult::Solved(solution.clone()),
            guesses: game.rounds() + 1,
        }),
        _ => {
            interface.display_computing_message();
            if let Some(recommendation) = recommend(&game.candidates, ranker) {
                interface.display_recommendation(&recommendation);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted input and records what was displayed.
    #[derive(Default)]
    struct ScriptedInterface {
        inputs: VecDeque<&'static str>,
        opening: Option<Opening>,
        rounds: Vec<RoundReport>,
        recommendations: Vec<Recommendation>,
        errors: Vec<String>,
        solutions: Vec<(Word, usize, bool)>,
        undone: Vec<usize>,
        new_games: usize,
        no_candidates: usize,
        computing: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(inputs: &[&'static str]) -> Self {
            Self {
                inputs: inputs.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_opening(&mut self, opening: &Opening) {
            self.opening = Some(opening.clone());
        }

        fn read_guess(&mut self, _guess_number: usize) -> Option<UserAction> {
            let Some(input) = self.inputs.pop_front() else {
                return Some(UserAction::Exit);
            };
            Some(match input {
                "exit" => UserAction::Exit,
                "next" => UserAction::NewGame,
                "undo" => UserAction::Undo,
                guess => UserAction::Guess(guess.to_string()),
            })
        }

        fn read_feedback(&mut self, _guess: &Word) -> Option<String> {
            self.inputs.pop_front().map(str::to_string)
        }

        fn display_invalid_input(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn display_round(&mut self, report: &RoundReport) {
            self.rounds.push(report.clone());
        }

        fn display_computing_message(&mut self) {
            self.computing += 1;
        }

        fn display_recommendation(&mut self, recommendation: &Recommendation) {
            self.recommendations.push(recommendation.clone());
        }

        fn display_no_candidates_message(&mut self) {
            self.no_candidates += 1;
        }

        fn display_solution_found(&mut self, solution: &Word, guesses: usize, deduced: bool) {
            self.solutions.push((solution.clone(), guesses, deduced));
        }

        fn display_undo_message(&mut self, remaining: usize) {
            self.undone.push(remaining);
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }

        fn display_new_game_message(&mut self, _word_count: usize) {
            self.new_games += 1;
        }

        fn read_play_again(&mut self) -> bool {
            self.inputs.front() == Some(&"again") && self.inputs.pop_front().is_some()
        }
    }

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn bank(words: &[&str]) -> Wordbank {
        Wordbank::new(words.iter().map(|s| w(s)).collect(), Vec::new(), 0).unwrap()
    }

    #[test]
    fn test_opening_uses_fixed_first_guess() {
        let wordbank = bank(&["adieu", "radio", "audio"]);
        let mut ui = ScriptedInterface::new(&["exit"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert!(outcomes.is_empty());
        let opening = ui.opening.unwrap();
        assert_eq!(opening.word_count, 3);
        assert_eq!(opening.suggestion.unwrap().guess, w("raise"));
        assert_eq!(ui.computing, 0);
        assert!(ui.exited);
    }

    #[test]
    fn test_opening_ranks_pool_without_fixed_guess() {
        let wordbank = bank(&["ghijk", "abcdf", "abcde"]);
        let settings = Settings {
            first_guess: None,
            ..Settings::default()
        };
        let mut ui = ScriptedInterface::new(&[]);
        game_loop(&wordbank, &settings, &mut ui);
        let suggestion = ui.opening.unwrap().suggestion.unwrap();
        assert_eq!(suggestion.guess, w("abcdf"));
        assert_eq!(suggestion.average_eliminated, Some(2));
        assert_eq!(ui.computing, 1);
    }

    #[test]
    fn test_all_green_solves_immediately() {
        let wordbank = bank(&["adieu", "radio", "audio"]);
        let mut ui = ScriptedInterface::new(&["radio", "ggggg"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::Solved(w("radio")),
                guesses: 1
            }]
        );
        assert_eq!(ui.rounds[0].eliminated, 2);
        assert_eq!(ui.rounds[0].remaining, 1);
        assert_eq!(ui.solutions, vec![(w("radio"), 1, false)]);
    }

    #[test]
    fn test_single_remaining_candidate_is_the_solution() {
        let wordbank = bank(&["adieu", "radio", "audio"]);
        // radio against audio: r absent, a yellow, d/i/o green.
        let mut ui = ScriptedInterface::new(&["radio", "ryggg"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::Solved(w("audio")),
                guesses: 2
            }]
        );
        assert_eq!(ui.rounds[0].sample, vec![w("audio")]);
        assert!(ui.recommendations.is_empty());
        assert_eq!(ui.solutions, vec![(w("audio"), 2, true)]);
    }

    #[test]
    fn test_feedback_narrows_to_one() {
        let wordbank = bank(&["crane", "slate", "raise", "stare", "lapse"]);
        let mut ui = ScriptedInterface::new(&["crane", "rrgrg", "exit"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        // No c, r or n, 'a' third and 'e' last leaves only "slate".
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::Solved(w("slate")),
                guesses: 2
            }]
        );
        assert_eq!(ui.rounds[0].eliminated, 4);
        assert_eq!(ui.solutions, vec![(w("slate"), 2, true)]);
    }

    #[test]
    fn test_recommendation_is_displayed_when_several_remain() {
        let wordbank = bank(&["ghijk", "abcdf", "abcde", "zzzzz"]);
        let settings = Settings {
            allow_unknown_guesses: true,
            ..Settings::default()
        };
        let mut ui = ScriptedInterface::new(&["zzzzz", "rrrrr", "exit"]);
        let outcomes = game_loop(&wordbank, &settings, &mut ui);
        assert_eq!(ui.rounds[0].remaining, 3);
        assert_eq!(ui.recommendations.len(), 1);
        assert_eq!(ui.recommendations[0].guess, w("abcdf"));
        assert_eq!(ui.recommendations[0].average_eliminated, Some(2));
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::Abandoned,
                guesses: 1
            }]
        );
    }

    #[test]
    fn test_contradiction_reports_no_candidates() {
        let wordbank = bank(&["crane", "slate"]);
        let mut ui = ScriptedInterface::new(&["crane", "rrrrr"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::NoCandidates,
                guesses: 1
            }]
        );
        assert_eq!(ui.no_candidates, 1);
        assert!(ui.exited);
    }

    #[test]
    fn test_all_green_on_past_solution_reports_no_candidates() {
        let solutions = ["audio", "adieu", "radio"].iter().map(|s| w(s)).collect();
        let wordbank = Wordbank::new(solutions, Vec::new(), 1).unwrap();
        // "audio" was already used, so it is a valid guess but not a candidate.
        let mut ui = ScriptedInterface::new(&["audio", "ggggg"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::NoCandidates,
                guesses: 1
            }]
        );
        assert_eq!(ui.rounds[0].remaining, 0);
        assert_eq!(ui.no_candidates, 1);
        assert!(ui.solutions.is_empty());
    }

    #[test]
    fn test_invalid_inputs_are_reported_and_retried() {
        let wordbank = bank(&["adieu", "radio", "audio"]);
        let mut ui = ScriptedInterface::new(&[
            "rad1o", "radios", "zzzzz", "radio", "ggxgg", "ggg", "ggggg",
        ]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(ui.errors.len(), 5);
        assert!(ui.errors[2].contains("not in the dictionary"));
        assert!(ui.errors[3].contains("'x'"));
        assert_eq!(
            outcomes,
            vec![GameOutcome {
                result: GameResult::Solved(w("radio")),
                guesses: 1
            }]
        );
    }

    #[test]
    fn test_undo_restores_previous_candidates() {
        let wordbank = bank(&["ghijk", "abcdf", "abcde", "zzzzz"]);
        let mut ui = ScriptedInterface::new(&["undo", "zzzzz", "rrrrr", "undo", "exit"]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(ui.errors, vec!["Nothing to undo.".to_string()]);
        assert_eq!(ui.rounds[0].remaining, 3);
        assert_eq!(ui.undone, vec![4]);
        // Undoing the only round leaves nothing to report.
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_new_game_and_play_again() {
        let wordbank = bank(&["ghijk", "abcdf", "abcde", "zzzzz"]);
        let mut ui = ScriptedInterface::new(&[
            "zzzzz", "rrrrr", "next", "abcde", "ggggg", "again", "ghijk", "ggggg",
        ]);
        let outcomes = game_loop(&wordbank, &Settings::default(), &mut ui);
        assert_eq!(
            outcomes,
            vec![
                GameOutcome {
                    result: GameResult::Abandoned,
                    guesses: 1
                },
                GameOutcome {
                    result: GameResult::Solved(w("abcde")),
                    guesses: 1
                },
                GameOutcome {
                    result: GameResult::Solved(w("ghijk")),
                    guesses: 1
                },
            ]
        );
        assert_eq!(ui.new_games, 2);
        assert!(ui.exited);
    }
}
