use thiserror::Error;

/// Errors raised by the elimination and ranking core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("\"{word}\" is not a valid word: {reason}")]
    InvalidWord { word: String, reason: String },

    #[error("Invalid feedback symbol '{symbol}' at position {}. Use r, y or g", .position + 1)]
    InvalidFeedbackSymbol { symbol: char, position: usize },

    #[error("Feedback must have {expected} symbols, found {found}")]
    FeedbackLength { expected: usize, found: usize },

    #[error("Expected a word of length {expected}, found length {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Position {position} is out of range for words of length {length}")]
    PositionOutOfRange { position: usize, length: usize },

    #[error("Cannot rank guesses over an empty candidate set")]
    EmptyCandidates,
}

/// Errors raised while loading word lists.
#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("Failed to read word list: {0}")]
    Io(#[from] std::io::Error),

    #[error("No usable {length}-letter words remain after skipping {skipped} past solutions")]
    NoWords { length: usize, skipped: usize },

    #[error(transparent)]
    Solver(#[from] SolverError),
}
