//! Fatal, non-recoverable error conditions.
//!
//! Steady-state search outcomes (a trumped search, a quota reached) are
//! plain control-flow values, not `Err` variants — see `SearchOutcome` in
//! `search_manager`. This enum only covers conditions that mean the crate
//! cannot proceed at all.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WordRectError {
    #[error("could not open dictionary file {path}: {source}")]
    DictionaryNotOpenable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary has no words of length {min}..={max}")]
    NoWordsInLengthRange { min: usize, max: usize },

    #[error("word {word:?} (len {len}) does not match trie word length {expected}")]
    WrongWordLength {
        word: Vec<u8>,
        len: usize,
        expected: usize,
    },

    #[error("word {word:?} inserted out of order (previous word was {previous:?})")]
    OutOfOrderInsertion { word: Vec<u8>, previous: Vec<u8> },

    #[error("invalid dimension range: min_tall {min_tall} > max_tall {max_tall}")]
    InvalidTallRange { min_tall: usize, max_tall: usize },

    #[error("invalid area range: min_area {min_area} > max_area {max_area}")]
    InvalidAreaRange { min_area: usize, max_area: usize },

    #[error("invalid word length range: min_word_length {min} > max_word_length {max}")]
    InvalidWordLengthRange { min: usize, max: usize },
}
