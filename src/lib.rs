// Library interface for wordle-assist
// This allows integration tests to access internal modules

pub mod candidates;
pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use candidates::CandidateSet;
pub use config::Settings;
pub use error::{SolverError, WordbankError};
pub use feedback::{Feedback, FeedbackCode};
pub use game_state::{GameInterface, GameOutcome, GameResult, UserAction, game_loop};
pub use solver::{AverageElimination, GuessRanker, Suggestion, average_eliminated, best_guess};
pub use word::{WORD_LENGTH, Word};
pub use wordbank::{Wordbank, load_wordbank_from_file, load_wordbank_from_str};
