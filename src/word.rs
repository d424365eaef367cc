use crate::error::SolverError;
use std::fmt;
use std::str::FromStr;

/// Letters per word in the daily puzzle.
pub const WORD_LENGTH: usize = 5;

/// A lowercase word made only of ASCII letters.
///
/// Input is trimmed and case-normalized on construction, so `" Crane"` and
/// `"crane"` produce the same `Word`. A `Word` never changes once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

impl Word {
    /// Build a word of any non-zero length.
    pub fn new(raw: &str) -> Result<Self, SolverError> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(SolverError::InvalidWord {
                word: raw.to_string(),
                reason: "word is empty".to_string(),
            });
        }
        if let Some(c) = normalized.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(SolverError::InvalidWord {
                word: raw.trim().to_string(),
                reason: format!("'{c}' is not a letter"),
            });
        }
        Ok(Self(normalized))
    }

    /// Build a word that must be exactly `length` letters long.
    pub fn with_length(raw: &str, length: usize) -> Result<Self, SolverError> {
        let word = Self::new(raw)?;
        if word.len() != length {
            return Err(SolverError::InvalidWord {
                word: word.0,
                reason: format!("expected {length} letters"),
            });
        }
        Ok(word)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `letter` occurs at any position.
    pub fn contains(&self, letter: u8) -> bool {
        self.as_bytes().contains(&letter)
    }

    /// The letter at `position`, if in range.
    pub fn letter_at(&self, position: usize) -> Option<u8> {
        self.as_bytes().get(position).copied()
    }

    pub(crate) fn ensure_len(&self, expected: usize) -> Result<(), SolverError> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(SolverError::LengthMismatch {
                expected,
                found: self.len(),
            })
        }
    }
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Word {
    type Error = SolverError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
