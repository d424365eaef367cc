//! Word-list loading.
//!
//! Lists are free text: words may be one per line or quoted and
//! comma-separated on a single line. A scanner splits the text into maximal
//! runs of word characters and runs of separator characters; every word run of
//! the right length made of letters is kept.

use crate::candidates::CandidateSet;
use crate::config::{DEFAULT_SEPARATORS, DICTIONARY_FILE, SOLUTIONS_FILE, user_list};
use crate::error::WordbankError;
use crate::word::{WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMBEDDED_SOLUTIONS: &str = include_str!("resources/solutions.txt");
pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// A maximal run of either word or separator characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Separator(&'a str),
}

/// Iterator over the [`Token`]s of a text, in order.
pub struct Tokens<'a> {
    text: &'a str,
    separators: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.text.chars().next()?;
        let separators = self.separators;
        let is_separator = |c: char| separators.contains(c);
        let in_separator = is_separator(first);
        let end = self
            .text
            .char_indices()
            .find(|&(_, c)| is_separator(c) != in_separator)
            .map_or(self.text.len(), |(i, _)| i);
        let (run, rest) = self.text.split_at(end);
        self.text = rest;
        Some(if in_separator {
            Token::Separator(run)
        } else {
            Token::Word(run)
        })
    }
}

/// Split `text` into alternating word and separator runs.
pub fn tokenize<'a>(text: &'a str, separators: &'a str) -> Tokens<'a> {
    Tokens { text, separators }
}

/// Every valid, distinct word in `data`, in first-seen order.
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for token in tokenize(data, DEFAULT_SEPARATORS) {
        let Token::Word(raw) = token else {
            continue;
        };
        match Word::with_length(raw, WORD_LENGTH) {
            Ok(word) => {
                if seen.insert(word.clone()) {
                    words.push(word);
                }
            }
            Err(e) => {
                debug_log!("Skipping word-list entry: {}", e);
            }
        }
    }
    words
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, WordbankError> {
    let data = fs::read_to_string(path.as_ref())?;
    let words = load_wordbank_from_str(&data);
    info_log!("Loaded {} words from {}", words.len(), path.as_ref().display());
    Ok(words)
}

/// Where a word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    File(PathBuf),
    Embedded(&'static str),
}

impl WordSource {
    /// An explicit path wins, then a file in the user data directory, then
    /// the list compiled into the binary.
    pub fn resolve(explicit: Option<&Path>, file_name: &str, embedded: &'static str) -> Self {
        match explicit {
            Some(path) => Self::File(path.to_path_buf()),
            None => user_list(file_name).map_or(Self::Embedded(embedded), Self::File),
        }
    }

    pub fn load(&self) -> Result<Vec<Word>, WordbankError> {
        match self {
            Self::File(path) => load_wordbank_from_file(path),
            Self::Embedded(data) => Ok(load_wordbank_from_str(data)),
        }
    }
}

/// Read-only set of words accepted as guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<Word>,
}

impl Dictionary {
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<Word> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// How many leading solution-list entries to treat as past answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Exactly this many. Skipping the whole list is an error.
    Exactly(usize),
    /// Up to this many, always leaving at least one candidate.
    AtMost(usize),
}

impl Skip {
    /// Number of entries to skip in a list of `available` solutions.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::Exactly(count) => count,
            Self::AtMost(count) => {
                let limit = available.saturating_sub(1);
                if count > limit {
                    log::warn!(
                        "Solution list has only {available} words; skipping {limit} instead of {count}"
                    );
                }
                count.min(limit)
            }
        }
    }
}

impl From<usize> for Skip {
    fn from(count: usize) -> Self {
        Self::Exactly(count)
    }
}

/// Everything a session is seeded from.
#[derive(Debug, Clone)]
pub struct Wordbank {
    candidates: CandidateSet,
    past_solutions: Vec<Word>,
    dictionary: Dictionary,
}

impl Wordbank {
    /// The first `skip` entries of `solutions` are past answers and never
    /// become candidates. The dictionary is every solution, past ones
    /// included, plus `extra_guesses`.
    pub fn new(
        solutions: Vec<Word>,
        extra_guesses: Vec<Word>,
        skip: impl Into<Skip>,
    ) -> Result<Self, WordbankError> {
        let skip = skip.into().resolve(solutions.len());
        if skip >= solutions.len() {
            return Err(WordbankError::NoWords {
                length: WORD_LENGTH,
                skipped: skip,
            });
        }
        let dictionary: Dictionary = solutions
            .iter()
            .chain(extra_guesses.iter())
            .cloned()
            .collect();
        let mut solutions = solutions;
        let remaining = solutions.split_off(skip);
        let candidates = CandidateSet::from_words(remaining, WORD_LENGTH)?;
        Ok(Self {
            candidates,
            past_solutions: solutions,
            dictionary,
        })
    }

    /// The lists compiled into the binary.
    pub fn embedded(skip: impl Into<Skip>) -> Result<Self, WordbankError> {
        Self::new(
            load_wordbank_from_str(EMBEDDED_SOLUTIONS),
            load_wordbank_from_str(EMBEDDED_DICTIONARY),
            skip,
        )
    }

    /// Resolve and load both lists; see [`WordSource::resolve`].
    pub fn load(
        solutions: Option<&Path>,
        dictionary: Option<&Path>,
        skip: impl Into<Skip>,
    ) -> Result<Self, WordbankError> {
        let solutions = WordSource::resolve(solutions, SOLUTIONS_FILE, EMBEDDED_SOLUTIONS);
        let dictionary = WordSource::resolve(dictionary, DICTIONARY_FILE, EMBEDDED_DICTIONARY);
        log::info!("Solutions from {solutions:?}, dictionary from {dictionary:?}");
        Self::new(solutions.load()?, dictionary.load()?, skip)
    }

    /// A fresh candidate set for a new game.
    pub fn candidates(&self) -> CandidateSet {
        self.candidates.clone()
    }

    pub fn word_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn past_solutions(&self) -> &[Word] {
        &self.past_solutions
    }

    pub fn is_past_solution(&self, word: &Word) -> bool {
        self.past_solutions.contains(word)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn test_tokenize_alternates_runs() {
        let tokens: Vec<Token> = tokenize("\"cigar\", \"rebut\"", DEFAULT_SEPARATORS).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Separator("\""),
                Token::Word("cigar"),
                Token::Separator("\", \""),
                Token::Word("rebut"),
                Token::Separator("\""),
            ]
        );
    }

    #[test]
    fn test_tokenize_edge_cases() {
        assert_eq!(tokenize("", DEFAULT_SEPARATORS).count(), 0);
        let tokens: Vec<Token> = tokenize("crane", DEFAULT_SEPARATORS).collect();
        assert_eq!(tokens, vec![Token::Word("crane")]);
        let tokens: Vec<Token> = tokenize(" \n ", DEFAULT_SEPARATORS).collect();
        assert_eq!(tokens, vec![Token::Separator(" \n ")]);
    }

    #[test]
    fn test_load_wordbank_from_str_quoted_list() {
        let loaded = load_wordbank_from_str("\"cigar\", \"rebut\", \"sissy\"\n");
        assert_eq!(loaded, words(&["cigar", "rebut", "sissy"]));
    }

    #[test]
    fn test_load_wordbank_from_str_filters_and_dedupes() {
        let data = "  CRANE  \nslate\nslates\ncr4ne\nab\ncrane\r\nRaise";
        let loaded = load_wordbank_from_str(data);
        assert_eq!(loaded, words(&["crane", "slate", "raise"]));
    }

    #[test]
    fn test_load_wordbank_from_file() {
        let path = std::env::temp_dir().join("wordle_assist_wordbank_unit.txt");
        fs::write(&path, "apple\ngrape\nlemon\n").unwrap();
        let loaded = load_wordbank_from_file(&path).unwrap();
        assert_eq!(loaded, words(&["apple", "grape", "lemon"]));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_wordbank_from_missing_file() {
        let result = load_wordbank_from_file("/definitely/not/here/words.txt");
        assert!(matches!(result, Err(WordbankError::Io(_))));
    }

    #[test]
    fn test_embedded_lists_are_valid() {
        let solutions = load_wordbank_from_str(EMBEDDED_SOLUTIONS);
        assert!(solutions.len() > 2000);
        assert_eq!(solutions[0].as_str(), "cigar");
        let bank = Wordbank::embedded(0).unwrap();
        assert_eq!(bank.word_count(), solutions.len());
        assert!(bank.dictionary().len() > solutions.len());
        assert!(bank.dictionary().contains(&Word::new("raise").unwrap()));
    }

    #[test]
    fn test_wordbank_skips_past_solutions() {
        let bank = Wordbank::new(
            words(&["cigar", "rebut", "sissy", "humph"]),
            words(&["adieu"]),
            2,
        )
        .unwrap();
        assert_eq!(bank.word_count(), 2);
        assert_eq!(bank.past_solutions(), words(&["cigar", "rebut"]).as_slice());
        assert!(bank.is_past_solution(&Word::new("cigar").unwrap()));
        let candidates = bank.candidates();
        assert!(!candidates.contains(&Word::new("cigar").unwrap()));
        assert!(candidates.contains(&Word::new("sissy").unwrap()));
        // Past answers are still acceptable guesses.
        assert!(bank.dictionary().contains(&Word::new("cigar").unwrap()));
        assert!(bank.dictionary().contains(&Word::new("adieu").unwrap()));
        assert_eq!(bank.dictionary().len(), 5);
    }

    #[test]
    fn test_wordbank_rejects_skipping_everything() {
        let result = Wordbank::new(words(&["cigar", "rebut"]), Vec::new(), 2);
        assert!(matches!(
            result,
            Err(WordbankError::NoWords { skipped: 2, .. })
        ));
        let result = Wordbank::new(Vec::new(), words(&["adieu"]), 0);
        assert!(matches!(result, Err(WordbankError::NoWords { .. })));
    }

    #[test]
    fn test_skip_at_most_leaves_one_candidate() {
        assert_eq!(Skip::AtMost(3).resolve(10), 3);
        assert_eq!(Skip::AtMost(30).resolve(10), 9);
        assert_eq!(Skip::AtMost(5).resolve(0), 0);
        assert_eq!(Skip::Exactly(30).resolve(10), 30);

        let bank = Wordbank::new(words(&["cigar", "rebut", "sissy"]), Vec::new(), Skip::AtMost(7))
            .unwrap();
        assert_eq!(bank.word_count(), 1);
        assert_eq!(bank.past_solutions().len(), 2);
    }

    #[test]
    fn test_embedded_list_covers_recent_puzzles() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let skip = crate::config::past_solutions_on(today);
        let total = load_wordbank_from_str(EMBEDDED_SOLUTIONS).len();
        let bank = Wordbank::embedded(skip).unwrap();
        assert_eq!(bank.past_solutions().len(), skip);
        assert_eq!(bank.word_count(), total - skip);
    }

    #[test]
    fn test_word_source_prefers_explicit_path() {
        let path = Path::new("/tmp/custom.txt");
        assert_eq!(
            WordSource::resolve(Some(path), SOLUTIONS_FILE, EMBEDDED_SOLUTIONS),
            WordSource::File(path.to_path_buf())
        );
    }
}
